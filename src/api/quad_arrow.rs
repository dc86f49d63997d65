use crate::api::quad_key::QuadKey;
use crate::core::codec::{CodecConfig, quadint_to_quadkey};
use crate::util::error::QuadError;
use arrow_array::{Array, RecordBatch, StringArray, UInt8Array, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use rayon::prelude::*;
use std::sync::Arc;

/// Trait for converting collections of [`QuadKey`]s to Arrow arrays.
///
/// Implemented for `[QuadKey]` and `Vec<QuadKey>`.
pub trait QuadKeysToArrow {
    /// Quadkey strings as a Utf8 array.
    fn to_quadkey_array(&self) -> StringArray;
    /// Packed quadints as a UInt64 array.
    fn to_quadint_array(&self) -> UInt64Array;
    /// RecordBatch with quadkey, quadint and zoom_level columns.
    fn to_record_batch(&self) -> Result<RecordBatch, QuadError>;
}

impl QuadKeysToArrow for [QuadKey] {
    fn to_quadkey_array(&self) -> StringArray {
        self.iter().map(|k| Some(k.as_str())).collect()
    }

    fn to_quadint_array(&self) -> UInt64Array {
        self.iter().map(|k| Some(k.to_quadint())).collect()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, QuadError> {
        let quadkeys = self.to_quadkey_array();
        let quadints = self.to_quadint_array();
        let zoom_levels: UInt8Array = self.iter().map(|k| Some(k.zoom_level())).collect();

        let schema = Schema::new(vec![
            Field::new("quadkey", DataType::Utf8, false),
            Field::new("quadint", DataType::UInt64, false),
            Field::new("zoom_level", DataType::UInt8, false),
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(quadkeys), Arc::new(quadints), Arc::new(zoom_levels)],
        )
        .map_err(|e| QuadError::ArrowError(e.to_string()))
    }
}

impl QuadKeysToArrow for Vec<QuadKey> {
    fn to_quadkey_array(&self) -> StringArray {
        self.as_slice().to_quadkey_array()
    }

    fn to_quadint_array(&self) -> UInt64Array {
        self.as_slice().to_quadint_array()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, QuadError> {
        self.as_slice().to_record_batch()
    }
}

/// Decodes a column of quadkeys into a column of quadints.
///
/// Rows are decoded in parallel; null rows stay null. The first invalid row
/// fails the whole column.
///
/// # Example
/// ```
/// use arrow_array::{Array, StringArray};
/// use quadint_rs::{CodecConfig, quadkeys_to_quadints};
///
/// # fn main() -> Result<(), quadint_rs::QuadError> {
/// let keys = StringArray::from(vec![Some("1"), None, Some("023")]);
/// let ints = quadkeys_to_quadints(&keys, &CodecConfig::default())?;
///
/// assert_eq!(ints.len(), 3);
/// assert!(ints.is_null(1));
/// assert_eq!(ints.value(0), (1u64 << 62) | 1);
/// # Ok(())
/// # }
/// ```
pub fn quadkeys_to_quadints(
    quadkeys: &StringArray,
    config: &CodecConfig,
) -> Result<UInt64Array, QuadError> {
    tracing::debug!(
        rows = quadkeys.len(),
        nulls = quadkeys.null_count(),
        policy = ?config.digit_policy,
        "decoding quadkey column"
    );

    let rows: Vec<Option<&str>> = quadkeys.iter().collect();
    let quadints = rows
        .par_iter()
        .enumerate()
        .map(|(row, quadkey)| match quadkey {
            Some(quadkey) => config.decode(quadkey).map(Some).inspect_err(|err| {
                tracing::debug!(row, quadkey, %err, "invalid quadkey in column");
            }),
            None => Ok(None),
        })
        .collect::<Result<Vec<Option<u64>>, QuadError>>()?;

    tracing::debug!(rows = quadints.len(), "decoded quadkey column");
    Ok(UInt64Array::from(quadints))
}

/// Encodes a column of quadints into a column of quadkeys.
///
/// Rows are encoded in parallel; null rows stay null. Never fails.
pub fn quadints_to_quadkeys(quadints: &UInt64Array) -> StringArray {
    tracing::debug!(
        rows = quadints.len(),
        nulls = quadints.null_count(),
        "encoding quadint column"
    );

    let rows: Vec<Option<u64>> = quadints.iter().collect();
    let quadkeys: Vec<Option<String>> = rows
        .par_iter()
        .map(|quadint| quadint.map(quadint_to_quadkey))
        .collect();

    StringArray::from(quadkeys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::{DigitPolicy, quadkey_to_quadint};

    #[test]
    fn test_keys_to_arrow_arrays() -> Result<(), QuadError> {
        let keys = vec![QuadKey::new("0")?, QuadKey::new("13")?, QuadKey::new("")?];

        let quadkeys = keys.to_quadkey_array();
        let quadints = keys.to_quadint_array();

        assert_eq!(quadkeys.len(), 3);
        assert_eq!(quadkeys.value(1), "13");
        assert_eq!(quadints.value(1), quadkey_to_quadint("13")?);
        assert_eq!(quadints.value(2), 0);
        Ok(())
    }

    #[test]
    fn test_keys_to_record_batch() -> Result<(), QuadError> {
        let keys = vec![QuadKey::new("023")?, QuadKey::new("1")?];
        let batch = keys.as_slice().to_record_batch()?;

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 3);
        assert_eq!(batch.schema().field(0).name(), "quadkey");
        assert_eq!(batch.schema().field(1).data_type(), &DataType::UInt64);

        let zooms = batch
            .column(2)
            .as_any()
            .downcast_ref::<UInt8Array>()
            .ok_or_else(|| QuadError::ArrowError("zoom_level is not UInt8".to_string()))?;
        assert_eq!(zooms.value(0), 3);
        assert_eq!(zooms.value(1), 1);
        Ok(())
    }

    #[test]
    fn test_empty_record_batch() -> Result<(), QuadError> {
        let keys: Vec<QuadKey> = Vec::new();
        let batch = keys.to_record_batch()?;
        assert_eq!(batch.num_rows(), 0);
        Ok(())
    }

    #[test]
    fn test_column_round_trip_preserves_nulls() -> Result<(), QuadError> {
        let keys = StringArray::from(vec![Some("0123"), None, Some(""), Some("3")]);

        let ints = quadkeys_to_quadints(&keys, &CodecConfig::default())?;
        assert_eq!(ints.null_count(), 1);
        assert!(ints.is_null(1));
        assert_eq!(ints.value(2), 0);

        let back = quadints_to_quadkeys(&ints);
        assert_eq!(back, keys);
        Ok(())
    }

    #[test]
    fn test_column_decode_fails_on_invalid_row() {
        let keys = StringArray::from(vec![Some("01"), Some("0a"), Some("2")]);

        let result = quadkeys_to_quadints(&keys, &CodecConfig::default());
        assert_eq!(
            result,
            Err(QuadError::InvalidDigit {
                position: 1,
                character: 'a',
            })
        );
    }

    #[test]
    fn test_column_decode_honours_policy() -> Result<(), QuadError> {
        let keys = StringArray::from(vec!["4", "999"]);

        assert!(quadkeys_to_quadints(&keys, &CodecConfig::default()).is_err());

        let config = CodecConfig::new().digit_policy(DigitPolicy::Permissive);
        let ints = quadkeys_to_quadints(&keys, &config)?;
        assert_eq!(ints.value(0), 1);
        assert_eq!(ints.value(1), 0xF400_0000_0000_0003);
        Ok(())
    }

    #[test]
    fn test_large_column_matches_scalar_codec() -> Result<(), QuadError> {
        let quadints: UInt64Array = (0u64..2048)
            .map(|i| Some((i << 42) | 11))
            .collect();

        let keys = quadints_to_quadkeys(&quadints);
        for row in 0..keys.len() {
            assert_eq!(keys.value(row), quadint_to_quadkey(quadints.value(row)));
        }

        let decoded = quadkeys_to_quadints(&keys, &CodecConfig::default())?;
        assert_eq!(decoded, quadints);
        Ok(())
    }
}
