//! Byte-level decoding and encoding of buffer content.

use tessel_primitives::Encoding;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
	#[error("File is not valid {encoding} (byte {offset})")]
	Decode { encoding: Encoding, offset: usize },
	#[error("Character {ch:?} cannot be saved as {encoding}")]
	Encode { encoding: Encoding, ch: char },
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];
const UTF32_LE_BOM: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
const UTF32_BE_BOM: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];

/// Decodes file content.
///
/// UTF-16 and UTF-32 honour a byte order mark and fall back to little
/// endian. UTF-7 is limited to its directly encoded 7-bit subset, with
/// `+-` standing for a literal `+`.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<String, EncodingError> {
	let fail = |offset| EncodingError::Decode { encoding, offset };
	match encoding {
		Encoding::Utf8 => {
			let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
			std::str::from_utf8(bytes)
				.map(str::to_owned)
				.map_err(|e| fail(e.valid_up_to()))
		}
		Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
			Some(offset) => Err(fail(offset)),
			None => Ok(bytes.iter().map(|&b| b as char).collect()),
		},
		Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
		Encoding::Utf7 => {
			let mut out = String::with_capacity(bytes.len());
			let mut i = 0;
			while i < bytes.len() {
				let b = bytes[i];
				if !b.is_ascii() {
					return Err(fail(i));
				}
				if b == b'+' {
					if bytes.get(i + 1) != Some(&b'-') {
						return Err(fail(i));
					}
					i += 1;
				}
				out.push(b as char);
				i += 1;
			}
			Ok(out)
		}
		Encoding::Utf16 => {
			let (big_endian, body, skipped) = if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
				(true, rest, 2)
			} else if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
				(false, rest, 2)
			} else {
				(false, bytes, 0)
			};
			if body.len() % 2 != 0 {
				return Err(fail(bytes.len() - 1));
			}
			let units = body.chunks_exact(2).map(|pair| {
				let pair = [pair[0], pair[1]];
				if big_endian { u16::from_be_bytes(pair) } else { u16::from_le_bytes(pair) }
			});
			let mut out = String::with_capacity(body.len() / 2);
			for (index, ch) in char::decode_utf16(units).enumerate() {
				match ch {
					Ok(ch) => out.push(ch),
					Err(_) => return Err(fail(skipped + index * 2)),
				}
			}
			Ok(out)
		}
		Encoding::Utf32 => {
			let (big_endian, body, skipped) = if let Some(rest) = bytes.strip_prefix(UTF32_LE_BOM) {
				(false, rest, 4)
			} else if let Some(rest) = bytes.strip_prefix(UTF32_BE_BOM) {
				(true, rest, 4)
			} else {
				(false, bytes, 0)
			};
			if body.len() % 4 != 0 {
				return Err(fail(bytes.len() - body.len() % 4));
			}
			body.chunks_exact(4)
				.enumerate()
				.map(|(index, quad)| {
					let quad = [quad[0], quad[1], quad[2], quad[3]];
					let value = if big_endian { u32::from_be_bytes(quad) } else { u32::from_le_bytes(quad) };
					char::from_u32(value).ok_or_else(|| fail(skipped + index * 4))
				})
				.collect()
		}
	}
}

/// Encodes text for writing. UTF-16 and UTF-32 output starts with a
/// little-endian byte order mark.
pub fn encode(text: &str, encoding: Encoding) -> Result<Vec<u8>, EncodingError> {
	let fail = |ch| EncodingError::Encode { encoding, ch };
	match encoding {
		Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
		Encoding::Ascii => text
			.chars()
			.map(|ch| if ch.is_ascii() { Ok(ch as u8) } else { Err(fail(ch)) })
			.collect(),
		Encoding::Latin1 => text
			.chars()
			.map(|ch| u8::try_from(u32::from(ch)).map_err(|_| fail(ch)))
			.collect(),
		Encoding::Utf7 => {
			let mut out = Vec::with_capacity(text.len());
			for ch in text.chars() {
				if !ch.is_ascii() {
					return Err(fail(ch));
				}
				out.push(ch as u8);
				if ch == '+' {
					out.push(b'-');
				}
			}
			Ok(out)
		}
		Encoding::Utf16 => {
			let mut out = UTF16_LE_BOM.to_vec();
			for unit in text.encode_utf16() {
				out.extend_from_slice(&unit.to_le_bytes());
			}
			Ok(out)
		}
		Encoding::Utf32 => {
			let mut out = UTF32_LE_BOM.to_vec();
			for ch in text.chars() {
				out.extend_from_slice(&u32::from(ch).to_le_bytes());
			}
			Ok(out)
		}
	}
}
