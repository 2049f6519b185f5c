use crate::error::{EncodeError, Result};
use crate::field::Field;

/// Sum of `bytes` modulo 256.
pub fn sum8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Checksum a run of fields, answering in the representation it was given.
///
/// All-numeric input yields `Field::Byte(sum % 256)`; all-textual input yields
/// two lowercase hex digits. Mixing the two is rejected. Empty input sums to
/// numeric zero.
pub fn checksum(fields: &[Field]) -> Result<Field> {
    let textual = fields.first().is_some_and(Field::is_text);
    if fields.iter().any(|f| f.is_text() != textual) {
        return Err(EncodeError::MixedRepresentation);
    }

    let values = fields
        .iter()
        .map(Field::value)
        .collect::<Result<Vec<u8>>>()?;
    let sum = sum8(&values);

    if textual {
        Ok(Field::Hex(format!("{sum:02x}")))
    } else {
        Ok(Field::Byte(sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_fields(texts: &[&str]) -> Vec<Field> {
        texts.iter().map(|t| Field::hex(*t)).collect()
    }

    #[test]
    fn textual_input_gives_lowercase_text() {
        let sum = checksum(&hex_fields(&["8C", "00", "00", "02", "01"])).unwrap();
        assert_eq!(sum, Field::hex("8f"));
    }

    #[test]
    fn numeric_input_gives_number() {
        let sum = checksum(&[Field::Byte(0x81), Field::Byte(0x60), Field::Byte(3)]).unwrap();
        assert_eq!(sum, Field::Byte(0xE4));
    }

    #[test]
    fn wraps_modulo_256() {
        let fields = vec![Field::Byte(200), Field::Byte(100), Field::Byte(250)];
        assert_eq!(checksum(&fields).unwrap(), Field::Byte(((200 + 100 + 250) % 256) as u8));

        let text = checksum(&hex_fields(&["ff", "02"])).unwrap();
        assert_eq!(text, Field::hex("01"));
    }

    #[test]
    fn matches_arithmetic_sum_across_lengths() {
        for len in 0..64usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 % 256) as u8).collect();
            let expected = (bytes.iter().map(|&b| b as u32).sum::<u32>() % 256) as u8;

            let numeric: Vec<Field> = bytes.iter().copied().map(Field::Byte).collect();
            assert_eq!(checksum(&numeric).unwrap(), Field::Byte(expected));

            if len > 0 {
                let textual: Vec<Field> =
                    bytes.iter().map(|b| Field::hex(format!("{b:02X}"))).collect();
                assert_eq!(
                    checksum(&textual).unwrap(),
                    Field::hex(format!("{expected:02x}"))
                );
            }
        }
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(checksum(&[]).unwrap(), Field::Byte(0));
    }

    #[test]
    fn mixed_input_is_rejected() {
        let err = checksum(&[Field::hex("8C"), Field::Byte(0)]).unwrap_err();
        assert_eq!(err, EncodeError::MixedRepresentation);
    }

    #[test]
    fn malformed_text_propagates() {
        let err = checksum(&hex_fields(&["8C", "xx"])).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidHex { .. }));
    }
}
