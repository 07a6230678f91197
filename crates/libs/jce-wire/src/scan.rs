//! Tag lookup for the decoder.
//!
//! Fields are written in ascending tag order, so a reader looking for tag `T`
//! walks forward: lower tags are skipped, `T` is a hit, and anything higher
//! (or the end of the struct) means `T` is absent. The head that proved
//! absence is pushed back so the next lookup starts from it.

use std::io::Read;

use crate::decoder::Decoder;
use crate::error::{JceError, Result};
use crate::wire_type::WireType;

impl<R: Read> Decoder<R> {
    /// Find the field carrying `tag` and return its wire type, positioned at
    /// its payload.
    ///
    /// `Ok(None)` means the tag is absent and `required` was false. A clean
    /// end of input counts as the end of the struct.
    pub fn locate_tag(&mut self, tag: u8, required: bool) -> Result<Option<WireType>> {
        let mut previous: Option<u8> = None;
        loop {
            let Some(head) = self.next_head()? else {
                if required {
                    log::debug!("jce: required tag {} missing at end of input", tag);
                    return Err(JceError::MissingRequiredField {
                        tag,
                        found_tag: None,
                        found_type: None,
                    });
                }
                return Ok(None);
            };

            if self.strict_tag_order && head.wire_type != WireType::StructEnd {
                if let Some(previous) = previous.filter(|&p| head.tag <= p) {
                    log::debug!(
                        "jce: tag {} after tag {} while looking for {}",
                        head.tag,
                        previous,
                        tag
                    );
                    return Err(JceError::NonAscendingTag {
                        previous,
                        found: head.tag,
                    });
                }
            }

            if head.wire_type == WireType::StructEnd || head.tag > tag {
                if required {
                    log::debug!(
                        "jce: required tag {} missing, found tag {} ({})",
                        tag,
                        head.tag,
                        head.wire_type
                    );
                    return Err(JceError::MissingRequiredField {
                        tag,
                        found_tag: Some(head.tag),
                        found_type: Some(head.wire_type),
                    });
                }
                self.unread_head();
                return Ok(None);
            }

            if head.tag == tag {
                return Ok(Some(head.wire_type));
            }

            log::trace!(
                "jce: skipping tag {} ({}) looking for {}",
                head.tag,
                head.wire_type,
                tag
            );
            self.skip_field(head.wire_type)?;
            previous = Some(head.tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::encoder::Encoder;

    fn encoded<F>(write: F) -> Vec<u8>
    where
        F: FnOnce(&mut Encoder<Vec<u8>>) -> Result<()>,
    {
        let mut enc = Encoder::new(Vec::new());
        write(&mut enc).expect("encode");
        enc.into_inner().expect("flush")
    }

    #[test]
    fn finds_tag_after_skipping_lower_ones() {
        let bytes = encoded(|enc| {
            enc.write_string("skip", 1)?;
            enc.write_u64(u64::MAX, 2)?;
            enc.write_u8(9, 7)
        });
        let mut dec = Decoder::new(&bytes[..]);
        let found = dec.locate_tag(7, true).expect("tag 7");
        assert_eq!(found, Some(WireType::Int1));
    }

    #[test]
    fn overshoot_pushes_head_back() {
        let bytes = encoded(|enc| enc.write_u16(500, 20));
        let mut dec = Decoder::new(&bytes[..]);
        assert_eq!(dec.locate_tag(3, false).expect("absent"), None);
        assert_eq!(dec.locate_tag(19, false).expect("absent"), None);
        assert_eq!(
            dec.locate_tag(20, true).expect("present"),
            Some(WireType::Int2)
        );
    }

    #[test]
    fn required_overshoot_reports_found_head() {
        let bytes = encoded(|enc| enc.write_string("x", 9));
        let mut dec = Decoder::new(&bytes[..]);
        let err = dec.locate_tag(4, true).expect_err("required");
        assert!(matches!(
            err,
            JceError::MissingRequiredField {
                tag: 4,
                found_tag: Some(9),
                found_type: Some(WireType::String),
            }
        ));
    }

    #[test]
    fn struct_end_stops_the_scan() {
        let bytes = encoded(|enc| {
            enc.write_u8(1, 0)?;
            enc.write_struct_field_end()?;
            enc.write_u8(2, 5)
        });
        let mut dec = Decoder::new(&bytes[..]);
        assert_eq!(dec.locate_tag(5, false).expect("stops at end"), None);
        dec.skip_to_struct_end().expect("consume end");
        assert_eq!(
            dec.locate_tag(5, true).expect("outer field"),
            Some(WireType::Int1)
        );
    }

    #[test]
    fn end_of_input_is_absence() {
        let mut dec = Decoder::new(&[][..]);
        assert_eq!(dec.locate_tag(0, false).expect("optional"), None);
        let err = dec.locate_tag(0, true).expect_err("required");
        assert!(matches!(
            err,
            JceError::MissingRequiredField {
                tag: 0,
                found_tag: None,
                found_type: None,
            }
        ));
    }

    #[test]
    fn strict_order_rejects_descending_tags() {
        let bytes = encoded(|enc| {
            enc.write_u8(1, 5)?;
            enc.write_u8(1, 3)?;
            enc.write_u8(1, 9)
        });
        let mut dec = Decoder::new(&bytes[..]);
        let err = dec.locate_tag(9, true).expect_err("descending");
        assert!(matches!(
            err,
            JceError::NonAscendingTag {
                previous: 5,
                found: 3,
            }
        ));

        let config = CodecConfig::default().permissive();
        let mut dec = Decoder::with_config(&bytes[..], &config);
        assert_eq!(
            dec.locate_tag(9, true).expect("permissive"),
            Some(WireType::Int1)
        );
    }

    #[test]
    fn strict_order_rejects_repeated_tags() {
        let bytes = encoded(|enc| {
            enc.write_u8(1, 2)?;
            enc.write_u8(1, 2)?;
            enc.write_u8(1, 4)
        });
        let mut dec = Decoder::new(&bytes[..]);
        let err = dec.locate_tag(4, false).expect_err("repeated");
        assert!(matches!(
            err,
            JceError::NonAscendingTag {
                previous: 2,
                found: 2,
            }
        ));
    }

    #[test]
    fn skip_error_aborts_lookup() {
        let mut bytes = encoded(|enc| {
            enc.write_string("abcdef", 1)?;
            enc.write_u8(1, 2)
        });
        bytes.truncate(4);
        let mut dec = Decoder::new(&bytes[..]);
        let err = dec.locate_tag(2, false).expect_err("truncated skip");
        assert!(err.is_truncated());
    }
}
