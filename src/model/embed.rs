use ndarray::{ArrayViewMut2, Zip};

use crate::{
    data::Record,
    error::{PipelineErr, Result},
};

/// Byte codes are projected into [0, 1] by this divisor.
const BYTE_SCALE: f32 = 255.0;

/// Embeds each record's text into its feature row: position `j` receives
/// `byte[j] / 255`, positions past the text length keep their zero fill.
/// Texts longer than the row are truncated at the row width.
///
/// Rows are written in parallel; no row reads another row's data, so lane
/// order never matters. The caller must hand in a zero-initialized buffer
/// with one row per record.
pub fn embed_into(records: &[Record], mut features: ArrayViewMut2<'_, f32>) -> Result<()> {
    if features.nrows() != records.len() {
        return Err(PipelineErr::SizeMismatch {
            a: "feature rows",
            b: "records",
            got: features.nrows(),
            expected: records.len(),
        });
    }

    Zip::indexed(features.rows_mut()).par_for_each(|i, mut row| {
        let width = row.len();
        for (j, byte) in records[i].text().bytes().take(width).enumerate() {
            row[j] = byte as f32 / BYTE_SCALE;
        }
    });
    Ok(())
}
