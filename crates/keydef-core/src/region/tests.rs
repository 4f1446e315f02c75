use super::*;
use crate::error::ErrorClass;
use std::io::Write;

#[test]
fn scope_truncates_on_drop() {
    let mut region = Region::new(64);
    region.alloc(8, "outer").expect("outer alloc");

    {
        let mut scope = region.scope();
        scope.alloc(16, "inner").expect("inner alloc");
        assert_eq!(scope.used(), 24);
    }

    assert_eq!(region.used(), 8);
}

#[test]
fn nested_scopes_release_in_lifo_order() {
    let mut region = Region::new(64);

    let mut outer = region.scope();
    outer.alloc(4, "a").expect("alloc a");
    {
        let mut inner = outer.scope();
        inner.alloc(4, "b").expect("alloc b");
        assert_eq!(inner.savepoint(), RegionSavepoint(4));
        assert_eq!(inner.used(), 8);
    }
    assert_eq!(outer.used(), 4);
    drop(outer);

    assert_eq!(region.used(), 0);
}

#[test]
fn scope_truncates_on_early_error_return() {
    fn fails(region: &mut Region) -> Result<(), InternalError> {
        let mut scope = region.scope();
        scope.alloc(10, "first")?;
        scope.alloc(100, "second")?;
        Ok(())
    }

    let mut region = Region::new(32);
    let err = fails(&mut region).expect_err("second alloc should exceed capacity");

    assert_eq!(err.class, ErrorClass::MemoryIssue);
    assert_eq!(
        err.message,
        "failed to allocate 100 bytes in region for second"
    );
    assert_eq!(region.used(), 0);
}

#[test]
fn alloc_copy_and_writer_spans_read_back() {
    let mut region = Region::new(32);
    let copied = region.alloc_copy(b"abc", "copy").expect("copy");

    let mut writer = region.writer();
    writer.write_all(b"defg").expect("write");
    let written = writer.finish();

    assert_eq!(region.bytes(copied), b"abc");
    assert_eq!(region.bytes(written), b"defg");
    assert_eq!(written.len(), 4);
}

#[test]
fn writer_refuses_to_exceed_capacity() {
    let mut region = Region::new(4);
    let mut writer = region.writer();

    let err = writer.write_all(b"too long").expect_err("write should fail");
    assert_eq!(err.kind(), std::io::ErrorKind::OutOfMemory);
}

#[test]
fn truncate_releases_back_to_savepoint() {
    let mut region = Region::new(64);
    region.alloc(4, "kept").expect("alloc kept");
    let savepoint = region.savepoint();
    region.alloc(12, "dropped").expect("alloc dropped");

    region.truncate(savepoint);

    assert_eq!(region.used(), 4);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "above watermark")]
fn truncate_above_watermark_asserts_in_debug() {
    let mut region = Region::new(64);
    region.alloc(4, "kept").expect("alloc kept");

    region.truncate(RegionSavepoint(32));
}

#[test]
#[cfg(not(debug_assertions))]
fn truncate_above_watermark_is_ignored_in_release() {
    let mut region = Region::new(64);
    region.alloc(4, "kept").expect("alloc kept");

    region.truncate(RegionSavepoint(32));

    assert_eq!(region.used(), 4);
}
