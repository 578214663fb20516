//! Tests for sequential readers, the buffered writer, and views
//!
//! These tests verify:
//! - Memory and file readers yield exactly `count` records in order
//! - File readers cross page boundaries and stop on partial pages
//! - The buffered writer appends at its start position and flushes on drop
//! - Memory and file views agree on key/value access

use levelkv::storage::{
    advance, BufferedWriter, FileReader, FileView, LevelFiles, MemReader, MemView,
    RandomAccessView, SequentialReader,
};
use levelkv::{Key, Record, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn record(key: Key, value: &str) -> Record {
    Record::new(key, value.parse::<Value>().unwrap())
}

fn numbered(keys: impl IntoIterator<Item = Key>) -> Vec<Record> {
    keys.into_iter()
        .map(|k| record(k, &format!("v{}", k)))
        .collect()
}

fn drain<R: SequentialReader>(reader: &mut R) -> Vec<Record> {
    let mut out = Vec::new();
    while let Some(r) = advance(reader).unwrap() {
        out.push(r);
    }
    out
}

fn files_with(dir: &TempDir, records: &[Record], page_size: usize) -> LevelFiles {
    let mut files = LevelFiles::create(dir.path(), 64).unwrap();
    {
        let mut writer = BufferedWriter::new(&mut files, page_size, 0);
        for r in records {
            writer.push(*r).unwrap();
        }
        writer.flush().unwrap();
    }
    files
}

// =============================================================================
// MemReader Tests
// =============================================================================

#[test]
fn test_mem_reader_yields_all_in_order() {
    let records = numbered([3, 1, 2]);
    let mut reader = MemReader::new(&records);

    assert_eq!(drain(&mut reader), records);
    assert!(!reader.has_next());
}

#[test]
fn test_mem_reader_empty() {
    let mut reader = MemReader::new(&[]);

    assert!(!reader.has_next());
    assert_eq!(advance(&mut reader).unwrap(), None);
}

// =============================================================================
// FileReader Tests
// =============================================================================

#[test]
fn test_file_reader_across_pages() {
    let temp = TempDir::new().unwrap();
    let records = numbered(0..10);
    let files = files_with(&temp, &records, 4);

    let mut reader = FileReader::new(&files, 10, 3);

    assert_eq!(drain(&mut reader), records);
}

#[test]
fn test_file_reader_stops_at_count() {
    let temp = TempDir::new().unwrap();
    let records = numbered(0..10);
    let files = files_with(&temp, &records, 4);

    let mut reader = FileReader::new(&files, 7, 4);

    assert_eq!(drain(&mut reader), records[..7].to_vec());
    assert!(!reader.has_next());
}

#[test]
fn test_file_reader_exact_page_multiple() {
    let temp = TempDir::new().unwrap();
    let records = numbered(0..8);
    let files = files_with(&temp, &records, 4);

    let mut reader = FileReader::new(&files, 8, 4);

    assert_eq!(drain(&mut reader), records);
}

#[test]
fn test_file_reader_zero_count() {
    let temp = TempDir::new().unwrap();
    let files = files_with(&temp, &numbered(0..4), 4);

    let mut reader = FileReader::new(&files, 0, 4);

    assert!(!reader.has_next());
}

#[test]
#[should_panic]
fn test_file_reader_next_past_end_panics() {
    let temp = TempDir::new().unwrap();
    let files = files_with(&temp, &numbered(0..2), 4);

    let mut reader = FileReader::new(&files, 2, 4);
    reader.next_record().unwrap();
    reader.next_record().unwrap();
    let _ = reader.next_record();
}

// =============================================================================
// BufferedWriter Tests
// =============================================================================

#[test]
fn test_writer_appends_at_start_position() {
    let temp = TempDir::new().unwrap();
    let mut files = files_with(&temp, &numbered(0..3), 2);

    {
        let mut writer = BufferedWriter::new(&mut files, 2, 3);
        writer.push(record(100, "x")).unwrap();
        writer.push(record(101, "y")).unwrap();
        writer.push(record(102, "z")).unwrap();
        assert_eq!(writer.next_position(), 6);
        writer.flush().unwrap();
    }

    assert_eq!(files.keys.read_range(0, 6).unwrap(), vec![0, 1, 2, 100, 101, 102]);
    assert_eq!(files.values.read_one(5).unwrap().as_string(), "z");
}

#[test]
fn test_writer_writes_full_pages_eagerly() {
    let temp = TempDir::new().unwrap();
    let mut files = LevelFiles::create(temp.path(), 64).unwrap();

    let mut writer = BufferedWriter::new(&mut files, 2, 0);
    writer.push(record(1, "a")).unwrap();
    writer.push(record(2, "b")).unwrap();
    writer.push(record(3, "c")).unwrap();
    drop(writer);

    assert_eq!(files.keys.read_range(0, 3).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_writer_flushes_on_drop() {
    let temp = TempDir::new().unwrap();
    let mut files = LevelFiles::create(temp.path(), 64).unwrap();

    {
        let mut writer = BufferedWriter::new(&mut files, 16, 0);
        writer.push(record(7, "seven")).unwrap();
    }

    assert_eq!(files.keys.len().unwrap(), 1);
    assert_eq!(files.values.read_one(0).unwrap().as_string(), "seven");
}

#[test]
fn test_writer_flush_twice_is_noop() {
    let temp = TempDir::new().unwrap();
    let mut files = LevelFiles::create(temp.path(), 64).unwrap();

    {
        let mut writer = BufferedWriter::new(&mut files, 16, 0);
        writer.push(record(1, "a")).unwrap();
        writer.flush().unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.next_position(), 1);
    }

    assert_eq!(files.keys.len().unwrap(), 1);
}

// =============================================================================
// View Tests
// =============================================================================

#[test]
fn test_mem_view_access() {
    let records = numbered([5, 6, 7]);
    let view = MemView::new(&records);

    assert_eq!(view.count(), 3);
    assert_eq!(view.key(1).unwrap(), 6);
    assert_eq!(view.value(2).unwrap().as_string(), "v7");
    assert_eq!(view.keys_in(1, 3).unwrap(), vec![6, 7]);
}

#[test]
fn test_file_view_matches_mem_view() {
    let temp = TempDir::new().unwrap();
    let records = numbered([9, -3, 4, 4, 12]);
    let files = files_with(&temp, &records, 2);

    let file_view = FileView::new(&files, records.len());
    let mem_view = MemView::new(&records);

    assert_eq!(file_view.count(), mem_view.count());
    for i in 0..records.len() {
        assert_eq!(file_view.key(i).unwrap(), mem_view.key(i).unwrap());
        assert_eq!(file_view.value(i).unwrap(), mem_view.value(i).unwrap());
    }
    assert_eq!(file_view.keys_in(1, 4).unwrap(), mem_view.keys_in(1, 4).unwrap());
}

#[test]
fn test_file_view_count_limits_visible_records() {
    let temp = TempDir::new().unwrap();
    let files = files_with(&temp, &numbered(0..6), 4);

    let view = FileView::new(&files, 3);

    assert_eq!(view.count(), 3);
    assert_eq!(view.keys_in(0, 3).unwrap(), vec![0, 1, 2]);
}
