use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use super::Record;
use crate::{config::PipelineConfig, error::Result};

/// Loads the record store from a line-oriented, comma-separated file.
///
/// A failure to open or read the file is fatal; individual lines that do not
/// yield a usable record are dropped without failing the load.
pub fn load_records(path: impl AsRef<Path>, cfg: &PipelineConfig) -> Result<Vec<Record>> {
    let file = File::open(path.as_ref())?;
    read_records(BufReader::new(file), cfg)
}

/// Reads records from any buffered source.
///
/// Line format: field 1 is the integer class code, fields 2-4 carry corpus
/// metadata and are skipped, and everything after the fourth comma up to the
/// end of the line is the text payload, embedded commas included.
pub fn read_records<R: BufRead>(reader: R, cfg: &PipelineConfig) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in reader.lines() {
        let line = line?;
        match parse_line(&line, cfg) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped = dropped; "skipped lines without a usable record");
    }
    Ok(records)
}

/// Parses one line, or `None` when the line has too few fields, an
/// out-of-domain label, or an empty text payload.
fn parse_line(line: &str, cfg: &PipelineConfig) -> Option<Record> {
    let mut fields = line.splitn(5, ',');

    let label = fields.next()?.trim().parse::<i32>().ok()?;
    if label != cfg.negative_label && label != cfg.positive_label {
        return None;
    }

    let text = fields.nth(3)?;
    if text.is_empty() {
        return None;
    }

    Some(Record::new(clamp_text(text, cfg.text_capacity), label))
}

/// Keeps the text strictly below `capacity` bytes, cutting on a char boundary.
fn clamp_text(text: &str, capacity: usize) -> &str {
    if text.len() < capacity {
        return text;
    }
    let mut end = capacity - 1;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn well_formed_line_is_loaded() {
        let input = Cursor::new("4,1467810369,Mon Apr 06,NO_QUERY,i love this\n");
        let records = read_records(input, &cfg()).unwrap();
        assert_eq!(records, vec![Record::new("i love this", 4)]);
    }

    #[test]
    fn commas_in_the_text_payload_survive() {
        let input = Cursor::new("0,id,date,query,awful, truly, awful\n");
        let records = read_records(input, &cfg()).unwrap();
        assert_eq!(records[0].text(), "awful, truly, awful");
    }

    #[test]
    fn short_line_is_dropped_not_fatal() {
        let input = Cursor::new("4,only,three,fields\n");
        let records = read_records(input, &cfg()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn out_of_domain_label_is_dropped() {
        let input = Cursor::new("2,id,date,query,neutral text\n");
        let records = read_records(input, &cfg()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn unparsable_label_is_dropped() {
        let input = Cursor::new("label,id,date,query,some text\n");
        let records = read_records(input, &cfg()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn empty_text_field_is_dropped() {
        let input = Cursor::new("0,id,date,query,\n");
        let records = read_records(input, &cfg()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn drops_do_not_lose_neighbors() {
        let input = Cursor::new("4,a,b,c,good one\nbad line\n0,a,b,c,bad one\n");
        let records = read_records(input, &cfg()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label(), 4);
        assert_eq!(records[1].label(), 0);
    }

    #[test]
    fn long_text_is_clamped_below_capacity() {
        let cfg = PipelineConfig {
            text_capacity: 8,
            ..PipelineConfig::default()
        };
        let line = format!("0,a,b,c,{}\n", "x".repeat(32));
        let records = read_records(Cursor::new(line), &cfg).unwrap();
        assert_eq!(records[0].text().len(), 7);
    }

    #[test]
    fn clamp_respects_char_boundaries() {
        // 'é' is two bytes; a cut through it must back off.
        let clamped = clamp_text("ééé", 4);
        assert!(clamped.len() < 4);
        assert!(clamped.is_char_boundary(clamped.len()));
        assert_eq!(clamped, "é");
    }
}
