/// Decodes one axis of a sample.
///
/// `variables` lists the axis bits in unary order. A coordinate `c` is encoded as
///     v_i = 1 for 0 <= i < c
///     v_i = 0 for c <= i < len
/// Returns `None` when a set bit follows an unset one, or when the sample is too
/// short to hold every listed variable.
pub fn decode_axis<I>(bits: &[bool], variables: I) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut coord = 0;
    let mut previous = true;
    for (v, index) in variables.into_iter().enumerate() {
        let bit = *bits.get(index)?;
        if bit {
            if !previous {
                return None;
            }
            coord = v + 1;
        }
        previous = bit;
    }
    Some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::encode_unary;
    use itertools::Itertools;

    #[test]
    fn test_all_zero_is_origin() {
        assert_eq!(decode_axis(&[false, false, false], 0..3), Some(0));
    }

    #[test]
    fn test_round_trip() {
        for bits in 1..=9 {
            for c in 0..=bits {
                assert_eq!(decode_axis(&encode_unary(c, bits), 0..bits), Some(c));
            }
        }
    }

    #[test]
    fn test_rejects_gap() {
        assert_eq!(decode_axis(&[false, true, false], 0..3), None);
        assert_eq!(decode_axis(&[true, false, true], 0..3), None);
        assert_eq!(decode_axis(&[false, false, true], 0..3), None);
    }

    #[test]
    fn test_exhaustive_three_bits() {
        let mut valid = Vec::new();
        for bits in std::iter::repeat_n([false, true], 3).multi_cartesian_product() {
            let has_gap = bits.windows(2).any(|w| !w[0] && w[1]);
            match decode_axis(&bits, 0..3) {
                Some(c) => {
                    assert!(!has_gap, "{bits:?} accepted");
                    assert_eq!(bits, encode_unary(c, 3));
                    valid.push(c);
                }
                None => assert!(has_gap, "{bits:?} rejected"),
            }
        }
        valid.sort_unstable();
        assert_eq!(valid, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_offset_block() {
        // y-block of a side-4 layout lives at 3..6
        let bits = [true, false, true, true, true, false];
        assert_eq!(decode_axis(&bits, 3..6), Some(2));
        assert_eq!(decode_axis(&bits, 0..3), None);
    }

    #[test]
    fn test_short_sample_is_invalid() {
        assert_eq!(decode_axis(&[true, true], 0..3), None);
        assert_eq!(decode_axis(&[], 0..1), None);
    }
}
