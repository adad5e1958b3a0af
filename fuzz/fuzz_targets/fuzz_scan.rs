#![no_main]
use jsonseek::{array_each, each_key, get, object_each, RawValue};
use libfuzzer_sys::fuzz_target;

/// The first input byte selects how many of the fixed path segments to
/// use, the second splits the rest into a custom segment and the
/// document. Every entry point must hold the no-panic and
/// region-containment invariants on arbitrary bytes.
fn scan(data: &[u8]) {
    if data.len() < 2 {
        return;
    }
    let depth = (data[0] % 4) as usize;
    let split = (data[1] as usize).min(data.len() - 2);
    let (head, doc) = data[2..].split_at(split);

    let segments = ["a", "[0]", "b", "[2]"];
    let custom = std::str::from_utf8(head).unwrap_or("k");
    let mut path: Vec<&str> = segments[..depth].to_vec();
    path.push(custom);

    let check = |v: RawValue<'_>| {
        let base = doc.as_ptr() as usize;
        let ptr = v.raw.as_ptr() as usize;
        assert!(ptr >= base && ptr + v.raw.len() <= base + doc.len());
        assert!(v.end <= doc.len());
    };

    if let Ok(v) = get(doc, &path) {
        check(v);
    }
    if let Ok(v) = get(doc, &[]) {
        check(v);
    }

    let _ = array_each(doc, &[], |v, offset| {
        check(v);
        assert!(offset < doc.len());
        Ok(())
    });
    let _ = object_each(doc, &[], |_, v, offset| {
        check(v);
        assert!(offset < doc.len());
        Ok(())
    });

    let paths: [&[&str]; 4] = [&path, &["a"], &["a", "b"], &["[1]"]];
    let _ = each_key(doc, &paths, |_, v| {
        check(v);
        Ok(())
    });
}

fuzz_target!(|data: &[u8]| scan(data));
