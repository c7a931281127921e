#[cfg(test)]
mod test {
    use crate::format::{FormatBuf, Persist, PersistRead, TypeList};
    use crate::io::{BinaryWrite, BufferReader};
    use crate::types::{Char, Currency, DateTime, Guid, TimeSpan, WChar};
    use crate::{is_read_target, is_write_source};
    use anyhow::Result;
    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use std::fmt::Debug;

    fn entry<T: Persist + ?Sized>() -> Vec<u8> {
        let mut f = FormatBuf::new();
        T::format(&mut f);
        f.into_bytes()
    }

    #[test]
    fn basic_entries() {
        assert_eq!(entry::<bool>(), [1, 0]);
        assert_eq!(entry::<Char>(), [2, 0]);
        assert_eq!(entry::<i8>(), [3, 0]);
        assert_eq!(entry::<u8>(), [4, 0]);
        assert_eq!(entry::<WChar>(), [5, 0]);
        assert_eq!(entry::<i16>(), [6, 0]);
        assert_eq!(entry::<u16>(), [7, 0]);
        assert_eq!(entry::<i32>(), [8, 0]);
        assert_eq!(entry::<u32>(), [9, 0]);
        assert_eq!(entry::<i64>(), [10, 0]);
        assert_eq!(entry::<u64>(), [11, 0]);
        assert_eq!(entry::<f32>(), [12, 0]);
        assert_eq!(entry::<f64>(), [13, 0]);
        assert_eq!(entry::<TimeSpan>(), [14, 0]);
        assert_eq!(entry::<DateTime>(), [15, 0]);
        assert_eq!(entry::<Currency>(), [16, 0]);
        assert_eq!(entry::<Guid>(), [17, 0]);
    }

    #[test]
    fn array_entries() {
        assert_eq!(entry::<[bool; 100]>(), [1, 3, 100]);
        assert_eq!(entry::<[bool; 128]>(), [1, 3, 0x80, 0x01]);
        assert_eq!(entry::<Vec<i32>>(), [8, 1]);
        assert_eq!(entry::<[i32]>(), entry::<Vec<i32>>());
        assert_eq!(entry::<&[i32]>(), entry::<Vec<i32>>());
        assert_eq!(entry::<Vec<WChar>>(), [5, 1]);

        // A string is a growable sequence of one-byte characters.
        assert_eq!(entry::<String>(), [2, 1]);
        assert_eq!(entry::<&str>(), [2, 1]);
        assert_eq!(entry::<Vec<Char>>(), [2, 1]);

        let tup_descriptor: [u8; 8] = [6, 1, 202, 0, 2, 1, 8, 0];
        let vec_of_tup = [&[129u8, 1][..], &tup_descriptor[..]].concat();
        assert_eq!(entry::<Vec<(i32,)>>(), vec_of_tup);
        let arr_of_tup = [&[128u8, 3][..], &tup_descriptor[..], &[3u8][..]].concat();
        assert_eq!(entry::<[(i32,); 3]>(), arr_of_tup);

        // References are written one by one, so they do not form basic arrays.
        assert_eq!(entry::<Vec<&bool>>(), [129, 1, 2, 1, 1, 0]);
        assert_eq!(entry::<&u64>(), entry::<u64>());
    }

    #[test]
    fn list_entries() {
        assert_eq!(entry::<()>(), [202, 0, 0, 0]);
        assert_eq!(entry::<(i32, f64)>(), [202, 0, 4, 2, 8, 0, 13, 0]);

        let nested = entry::<((i32, f64), (bool, i64))>();
        assert_eq!(nested.len(), 20);
        assert_eq!(&nested[..4], &[202, 0, 16, 2]);

        assert_eq!(entry::<Option<i16>>(), [215, 0, 2, 1, 6, 0]);
        assert_eq!(<(u8, u8, u8) as TypeList>::LEN, 3);
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(<bool as Persist>::FIXED_SIZE, Some(1));
        assert_eq!(<Guid as Persist>::FIXED_SIZE, Some(16));
        assert_eq!(<(bool, i16, i64, i32) as Persist>::FIXED_SIZE, Some(15));
        assert_eq!(<[i32; 4] as Persist>::FIXED_SIZE, Some(16));
        assert_eq!(<[[u16; 2]; 3] as Persist>::FIXED_SIZE, Some(12));
        assert_eq!(<() as Persist>::FIXED_SIZE, Some(0));
        assert_eq!(<(&i32, &f64) as Persist>::FIXED_SIZE, Some(12));

        assert_eq!(<Vec<u8> as Persist>::FIXED_SIZE, None);
        assert_eq!(<(i32, String) as Persist>::FIXED_SIZE, None);
        assert_eq!(<Option<i32> as Persist>::FIXED_SIZE, None);
        assert_eq!(<[String; 2] as Persist>::FIXED_SIZE, None);
    }

    #[test]
    fn buffer_sizes() {
        assert_eq!(vec![true; 9].buffer_size(), 1 + 2);
        assert_eq!(Vec::<bool>::new().buffer_size(), 1);
        assert_eq!(String::from("héllo").buffer_size(), 1 + 6);
        assert_eq!(vec![0u64; 200].buffer_size(), 2 + 1600);
        assert_eq!(Some(5i32).buffer_size(), 5);
        assert_eq!(None::<i32>.buffer_size(), 1);
        assert_eq!(
            (1u8, "ab", vec![(1i16, String::from("x"))]).buffer_size(),
            1 + 3 + (1 + 2 + 2)
        );
    }

    #[test]
    fn capabilities() {
        assert!(is_read_target!(Vec<i8>));
        assert!(!is_read_target!(&[i8]));
        assert!(is_write_source!(Vec<i8>));
        assert!(is_write_source!(&[i8]));

        assert!(is_read_target!(String));
        assert!(!is_read_target!(&str));
        assert!(is_write_source!(str));
        assert!(is_read_target!([u16; 8]));
        assert!(is_read_target!(Option<(i32, String)>));
        assert!(!is_write_source!(std::collections::HashMap<i32, i32>));
    }

    #[test]
    fn packed_bools() -> Result<()> {
        let bits = vec![true, false, true, true, false, false, false, false, true];
        let mut payload = vec![];
        bits.write(&mut payload)?;
        assert_eq!(payload, [9, 0x0D, 0x01]);
        assert_eq!(payload.len(), bits.buffer_size());

        let read = Vec::<bool>::read_new(&mut BufferReader::new(&payload))?;
        assert_eq!(read, bits);
        Ok(())
    }

    #[test]
    fn scalar_layout_is_little_endian() -> Result<()> {
        let mut payload = vec![];
        0x0102_0304i32.write(&mut payload)?;
        (-2i16).write(&mut payload)?;
        1.0f32.write(&mut payload)?;
        assert_eq!(payload, [4, 3, 2, 1, 0xFE, 0xFF, 0, 0, 0x80, 0x3F]);

        let mut r = BufferReader::new(&[0x05]);
        assert!(bool::read_new(&mut r)?);
        Ok(())
    }

    /* Round trips of mixed values */

    #[derive(PartialEq, Debug)]
    enum Sample {
        I32(i32),
        Str(String),
        Bools(Vec<bool>),
        Opt(Option<u16>),
        Tup((i8, String, [u16; 3])),
        Nested(Vec<(bool, Option<String>)>),
        Stamps([(DateTime, Currency); 2]),
    }
    impl Sample {
        fn write(&self, w: &mut Vec<u8>) -> crate::Result<usize> {
            let before = w.len();
            match self {
                Self::I32(v) => v.write(w)?,
                Self::Str(v) => v.write(w)?,
                Self::Bools(v) => v.write(w)?,
                Self::Opt(v) => v.write(w)?,
                Self::Tup(v) => v.write(w)?,
                Self::Nested(v) => v.write(w)?,
                Self::Stamps(v) => v.write(w)?,
            }
            Ok(w.len() - before)
        }
        fn buffer_size(&self) -> usize {
            match self {
                Self::I32(v) => v.buffer_size(),
                Self::Str(v) => v.buffer_size(),
                Self::Bools(v) => v.buffer_size(),
                Self::Opt(v) => v.buffer_size(),
                Self::Tup(v) => v.buffer_size(),
                Self::Nested(v) => v.buffer_size(),
                Self::Stamps(v) => v.buffer_size(),
            }
        }
        fn read_like(&self, r: &mut BufferReader) -> crate::Result<Self> {
            let read = match self {
                Self::I32(_) => Self::I32(PersistRead::read_new(r)?),
                Self::Str(_) => Self::Str(PersistRead::read_new(r)?),
                Self::Bools(_) => Self::Bools(PersistRead::read_new(r)?),
                Self::Opt(_) => Self::Opt(PersistRead::read_new(r)?),
                Self::Tup(_) => Self::Tup(PersistRead::read_new(r)?),
                Self::Nested(_) => Self::Nested(PersistRead::read_new(r)?),
                Self::Stamps(_) => Self::Stamps(PersistRead::read_new(r)?),
            };
            Ok(read)
        }
    }

    fn gen_i32() -> Sample {
        Sample::I32(-123_456)
    }
    fn gen_str() -> Sample {
        Sample::Str(String::from("asdf ✓"))
    }
    fn gen_bools() -> Sample {
        Sample::Bools((0..19).map(|i| i % 3 == 0).collect())
    }
    fn gen_empty_bools() -> Sample {
        Sample::Bools(vec![])
    }
    fn gen_opt_none() -> Sample {
        Sample::Opt(None)
    }
    fn gen_opt_some() -> Sample {
        Sample::Opt(Some(0xBEEF))
    }
    fn gen_tup() -> Sample {
        Sample::Tup((-7, String::from("zxcv"), [1, 2, 0xFFFF]))
    }
    fn gen_nested() -> Sample {
        Sample::Nested(vec![
            (true, None),
            (false, Some(String::new())),
            (true, Some(String::from("qwer"))),
        ])
    }
    fn gen_stamps() -> Sample {
        Sample::Stamps([
            (DateTime::from_ticks(638_000_000_000_000_000), Currency::from_scaled(-1)),
            (DateTime::from_ticks(0), Currency::from_scaled(i64::MAX)),
        ])
    }

    fn verify(samples: &[Sample]) -> Result<()> {
        let mut payload = vec![];
        let mut w_len_at_each = vec![];
        for sample in samples {
            let w_len = sample.write(&mut payload)?;
            assert_eq!(w_len, sample.buffer_size(), "{sample:?}");
            w_len_at_each.push(payload.len());
        }

        let mut r = BufferReader::new(&payload);
        for (i, sample) in samples.iter().enumerate() {
            let read = sample.read_like(&mut r)?;
            assert_eq!(&read, sample);
            assert_eq!(r.position(), w_len_at_each[i]);
        }
        assert_eq!(r.position(), payload.len());
        Ok(())
    }

    #[test]
    fn write_then_read() -> Result<()> {
        let mut rand_rng = rand::thread_rng();

        let gen_fns = [
            gen_i32,
            gen_str,
            gen_bools,
            gen_empty_bools,
            gen_opt_none,
            gen_opt_some,
            gen_tup,
            gen_nested,
            gen_stamps,
        ];

        for gen_fns in gen_fns.iter().powerset() {
            let mut samples = gen_fns.iter().map(|gen_fn| gen_fn()).collect::<Vec<_>>();
            verify(&samples)?;

            samples.shuffle(&mut rand_rng);
            verify(&samples)?;
        }

        Ok(())
    }

    #[test]
    fn write_views_read_owned() -> Result<()> {
        let owned = vec![3i8, -4, 5];
        let mut payload = vec![];
        (&owned[..]).write(&mut payload)?;
        "view".write(&mut payload)?;
        payload.write_len(0)?;

        let mut r = BufferReader::new(&payload);
        assert_eq!(Vec::<i8>::read_new(&mut r)?, owned);
        assert_eq!(String::read_new(&mut r)?, "view");
        assert_eq!(Vec::<String>::read_new(&mut r)?, Vec::<String>::new());
        Ok(())
    }

    #[test]
    fn corrupt_payloads() {
        // Invalid UTF-8.
        let mut r = BufferReader::new(&[2, 0xC3, 0x28]);
        assert!(matches!(
            String::read_new(&mut r),
            Err(crate::Error::MalformedPayload(_))
        ));

        // Presence byte out of range.
        let mut r = BufferReader::new(&[2, 0, 0]);
        assert!(matches!(
            Option::<u16>::read_new(&mut r),
            Err(crate::Error::MalformedPayload(_))
        ));

        // Count larger than the payload.
        let mut r = BufferReader::new(&[0xFF, 0xFF, 0x03, 1, 2]);
        assert!(matches!(
            Vec::<u32>::read_new(&mut r),
            Err(crate::Error::MalformedPayload(_))
        ));

        // Zero-size items claiming a huge count.
        let payload = crate::varint::encode(1 << 40);
        assert!(matches!(
            Vec::<()>::read_new(&mut BufferReader::new(&payload)),
            Err(crate::Error::MalformedPayload(_))
        ));
        assert!(matches!(
            Vec::<[u8; 0]>::read_new(&mut BufferReader::new(&payload)),
            Err(crate::Error::MalformedPayload(_))
        ));

        // Truncated fixed array.
        let mut r = BufferReader::new(&[1, 0, 2]);
        assert!(matches!(
            <[u16; 2]>::read_new(&mut r),
            Err(crate::Error::MalformedPayload(_))
        ));
    }

    /* Every scalar kind, alone and in containers */

    fn write_then_read_new<T: PersistRead>(val: &T) -> crate::Result<T> {
        let mut payload = vec![];
        val.write(&mut payload)?;
        assert_eq!(payload.len(), val.buffer_size());

        let mut r = BufferReader::new(&payload);
        let read = T::read_new(&mut r)?;
        assert_eq!(r.position(), payload.len());
        Ok(read)
    }

    fn verify_scalar<T: PersistRead + PartialEq + Clone + Debug>(val: T) -> crate::Result<()> {
        assert_eq!(write_then_read_new(&val)?, val);
        assert_eq!(write_then_read_new(&Some(val.clone()))?, Some(val.clone()));
        assert_eq!(write_then_read_new(&None::<T>)?, None);
        assert_eq!(write_then_read_new(&Vec::<T>::new())?, Vec::<T>::new());
        let items = vec![val.clone(), val.clone(), val];
        assert_eq!(write_then_read_new(&items)?, items);
        Ok(())
    }

    fn to_case_result(res: crate::Result<()>) -> Result<(), TestCaseError> {
        res.map_err(|e| TestCaseError::fail(e.to_string()))
    }

    #[test]
    fn scalar_extremes() -> Result<()> {
        for b in [false, true] {
            verify_scalar(b)?;
        }
        for v in [0, b'a', u8::MAX] {
            verify_scalar(Char::from(v))?;
            verify_scalar(v)?;
        }
        for v in [i8::MIN, 0, i8::MAX] {
            verify_scalar(v)?;
        }
        for v in [0, 0x263A, u16::MAX] {
            verify_scalar(WChar::from(v))?;
            verify_scalar(v)?;
        }
        for v in [i16::MIN, -1, i16::MAX] {
            verify_scalar(v)?;
        }
        for v in [i32::MIN, -1, i32::MAX] {
            verify_scalar(v)?;
        }
        for v in [0, u32::MAX] {
            verify_scalar(v)?;
        }
        for v in [i64::MIN, -1, 0, i64::MAX] {
            verify_scalar(v)?;
            verify_scalar(TimeSpan::from_ticks(v))?;
            verify_scalar(DateTime::from_ticks(v))?;
            verify_scalar(Currency::from_scaled(v))?;
        }
        for v in [0, u64::MAX] {
            verify_scalar(v)?;
        }
        for v in [f32::MIN, -0.5, f32::MAX, f32::INFINITY] {
            verify_scalar(v)?;
        }
        for v in [f64::MIN_POSITIVE, -1.25, f64::NEG_INFINITY] {
            verify_scalar(v)?;
        }
        verify_scalar(Guid::default())?;
        verify_scalar(Guid::from([0xA5; 16]))?;
        Ok(())
    }

    proptest! {
        #[test]
        fn narrow_scalars(
            b in any::<bool>(),
            c in any::<u8>(),
            sb in any::<i8>(),
            wc in any::<u16>(),
            i in any::<i16>(),
        ) {
            to_case_result(verify_scalar(b))?;
            to_case_result(verify_scalar(Char::from(c)))?;
            to_case_result(verify_scalar(c))?;
            to_case_result(verify_scalar(sb))?;
            to_case_result(verify_scalar(WChar::from(wc)))?;
            to_case_result(verify_scalar(wc))?;
            to_case_result(verify_scalar(i))?;
        }

        #[test]
        fn wide_scalars(
            i in any::<i32>(),
            u in any::<u32>(),
            l in any::<i64>(),
            ul in any::<u64>(),
            f in -1.0e30f32..1.0e30f32,
            d in -1.0e300f64..1.0e300f64,
        ) {
            to_case_result(verify_scalar(i))?;
            to_case_result(verify_scalar(u))?;
            to_case_result(verify_scalar(l))?;
            to_case_result(verify_scalar(ul))?;
            to_case_result(verify_scalar(f))?;
            to_case_result(verify_scalar(d))?;
        }

        #[test]
        fn tick_scalars(ticks in any::<i64>(), scaled in any::<i64>(), guid in any::<[u8; 16]>()) {
            to_case_result(verify_scalar(TimeSpan::from_ticks(ticks)))?;
            to_case_result(verify_scalar(DateTime::from_ticks(ticks)))?;
            to_case_result(verify_scalar(Currency::from_scaled(scaled)))?;
            to_case_result(verify_scalar(Guid::from(guid)))?;
        }
    }
}
