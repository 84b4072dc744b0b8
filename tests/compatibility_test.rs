use foldsort::core::KeyAccessor;
use foldsort::prelude::*;

// Simulate an external struct (like a line-split text buffer)
struct MockLineBuffer {
    data: Vec<u8>,
    offsets: Vec<usize>,
}

impl MockLineBuffer {
    fn new(text: &str) -> Self {
        let data = text.as_bytes().to_vec();
        let mut offsets = vec![0];
        for (i, &b) in data.iter().enumerate() {
            if b == b'\n' {
                offsets.push(i + 1);
            }
        }
        Self { data, offsets }
    }
}

// Implement KeyAccessor for the external struct.
// This proves the trait is implementable by "outside crates".
impl KeyAccessor for MockLineBuffer {
    fn get_key(&self, index: usize) -> &[u8] {
        let start = self.offsets[index];
        let end = self.offsets[index + 1] - 1; // strip '\n'
        &self.data[start..end]
    }

    fn len(&self) -> usize {
        self.offsets.len() - 1
    }
}

#[test]
fn test_external_struct_compatibility() {
    let mock = MockLineBuffer::new("foo\nBar\nbaz\n\nFOO\n");

    for engine in Engine::ALL {
        let indices = Sorter::new(engine).sort_indices(&mock).unwrap();
        assert_eq!(indices[0], 3, "empty line first ({})", engine.name());
        assert_eq!(&indices[1..3], &[1, 2], "engine {}", engine.name());

        let mut tail = indices[3..].to_vec();
        tail.sort();
        assert_eq!(tail, vec![0, 4], "engine {}", engine.name());
    }
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_unsupported_size_is_reported() {
    // Claims more elements than the packed key can address; never read.
    struct Oversized;

    impl KeyAccessor for Oversized {
        fn get_key(&self, _index: usize) -> &[u8] {
            b""
        }

        fn len(&self) -> usize {
            foldsort::MAX_ELEMENTS + 1
        }
    }

    for engine in Engine::ALL {
        let err = Sorter::new(engine).sort_indices(&Oversized).unwrap_err();
        assert_eq!(
            err,
            SortError::UnsupportedSize {
                len: foldsort::MAX_ELEMENTS + 1,
                max: foldsort::MAX_ELEMENTS,
            }
        );
        assert!(err.to_string().contains("exceed the supported maximum"));
    }
}
