use foldsort::prelude::*;
use foldsort::validate::{verify_order, verify_permutation, verify_sorted};
use rand::Rng;
use std::cmp::Ordering;

/// Comparable projection of a string: its folded bytes up to the terminator.
fn folded(s: &[u8]) -> Vec<u8> {
    s.iter().take_while(|&&b| b != 0).map(|b| b.to_ascii_lowercase()).collect()
}

fn expected_order<T: AsRef<[u8]> + Clone>(input: &[T]) -> Vec<Vec<u8>> {
    let mut expected = input.to_vec();
    expected.sort_by(|a, b| compare_folded(a.as_ref(), b.as_ref()));
    expected.iter().map(|s| folded(s.as_ref())).collect()
}

fn assert_sorts_like_oracle<T: AsRef<[u8]> + Clone + std::fmt::Debug>(engine: Engine, input: &[T]) {
    let expected = expected_order(input);

    let mut data = input.to_vec();
    Sorter::new(engine).sort(&mut data).unwrap();
    let actual: Vec<Vec<u8>> = data.iter().map(|s| folded(s.as_ref())).collect();
    assert_eq!(actual, expected, "engine {}", engine.name());

    let indices = Sorter::new(engine).sort_indices(input).unwrap();
    verify_permutation(&indices, input.len()).unwrap();
    verify_order(input, &indices).unwrap();
}

#[test]
fn test_scenario_mixed_case() {
    for engine in Engine::ALL {
        let mut data = vec!["banana", "Apple", "apple", "Cherry"];
        Sorter::new(engine).sort(&mut data).unwrap();

        assert!(
            data == ["Apple", "apple", "banana", "Cherry"] || data == ["apple", "Apple", "banana", "Cherry"],
            "engine {}: {:?}",
            engine.name(),
            data
        );
    }
}

#[test]
fn test_scenario_prefix_first() {
    for engine in Engine::ALL {
        let mut data = vec!["a", "aa", "A", "aaa"];
        Sorter::new(engine).sort(&mut data).unwrap();

        let mut head = data[..2].to_vec();
        head.sort();
        assert_eq!(head, vec!["A", "a"], "engine {}", engine.name());
        assert_eq!(&data[2..], &["aa", "aaa"], "engine {}", engine.name());
    }
}

#[test]
fn test_basic_sort_strings() {
    let input = vec![
        "banana".to_string(),
        "apple".to_string(),
        "cherry".to_string(),
        "date".to_string(),
    ];

    for engine in Engine::ALL {
        let indices = Sorter::new(engine).sort_indices(&input).unwrap();
        assert_eq!(indices, vec![1, 0, 2, 3], "engine {}", engine.name());
    }
}

#[test]
fn test_empty_and_single() {
    for engine in Engine::ALL {
        let mut empty: Vec<&str> = vec![];
        Sorter::new(engine).sort(&mut empty).unwrap();
        assert!(empty.is_empty());
        assert!(Sorter::new(engine).sort_indices(&empty).unwrap().is_empty());

        let mut single = vec!["only"];
        Sorter::new(engine).sort(&mut single).unwrap();
        assert_eq!(single, vec!["only"]);
        assert_eq!(Sorter::new(engine).sort_indices(&single).unwrap(), vec![0]);
    }
}

#[test]
fn test_long_common_prefix() {
    let prefix = "a".repeat(100);
    let input = vec![
        format!("{}c", prefix),
        format!("{}A", prefix),
        format!("{}b", prefix),
        prefix.clone(),
    ];

    for engine in Engine::ALL {
        let indices = Sorter::new(engine).sort_indices(&input).unwrap();
        assert_eq!(indices, vec![3, 1, 2, 0], "engine {}", engine.name());
    }
}

#[test]
fn test_window_boundaries() {
    // Differences right before, at and after each 4-byte window boundary.
    let input = vec![
        "abcX", "abcx", "abcW", "abcdE", "abcde", "abcdD", "abcdefgZ", "abcdefgh", "ABCDEFGHa", "abcdefghA",
        "abcdefgh!", "abc", "ab", "abcd", "abcdefg",
    ];
    for engine in Engine::ALL {
        assert_sorts_like_oracle(engine, &input);
    }
}

#[test]
fn test_case_only_differences() {
    let input = vec!["MiXeD", "mixed", "MIXED", "mIxEd", "mixed!", "mixe"];
    for engine in Engine::ALL {
        let mut data = input.clone();
        Sorter::new(engine).sort(&mut data).unwrap();
        assert_eq!(data[0], "mixe");
        assert!(data[1..5].iter().all(|s| s.eq_ignore_ascii_case("mixed")));
        assert_eq!(data[5], "mixed!");
    }
}

#[test]
fn test_punctuation_between_cases() {
    // '[' '\\' ']' '^' '_' '`' sit between 'Z' and 'a' in ASCII; folding to
    // lower case puts them before every letter.
    let input = vec!["_x", "Zx", "ax", "[x", "`x", "Ax", "zx", "@x"];
    for engine in Engine::ALL {
        let mut data = input.clone();
        Sorter::new(engine).sort(&mut data).unwrap();
        verify_sorted(&data).unwrap();
        assert_eq!(data[0], "@x");
        assert_eq!(data[1], "[x");
        assert_eq!(data[2], "_x");
        assert_eq!(data[3], "`x");
    }
}

#[test]
fn test_idempotent() {
    let mut rng = rand::rng();
    let input: Vec<String> = (0..2_000)
        .map(|_| {
            let len = rng.random_range(0..12);
            (0..len).map(|_| rng.random_range(b'A'..=b'z') as char).collect()
        })
        .collect();

    for engine in Engine::ALL {
        let mut once = input.clone();
        Sorter::new(engine).sort(&mut once).unwrap();
        let mut twice = once.clone();
        Sorter::new(engine).sort(&mut twice).unwrap();

        let once: Vec<Vec<u8>> = once.iter().map(|s| folded(s.as_bytes())).collect();
        let twice: Vec<Vec<u8>> = twice.iter().map(|s| folded(s.as_bytes())).collect();
        assert_eq!(once, twice, "engine {}", engine.name());
    }
}

#[test]
fn test_all_duplicates() {
    let input: Vec<&str> = (0..500).map(|i| if i % 2 == 0 { "same" } else { "SAME" }).collect();
    for engine in Engine::ALL {
        let indices = Sorter::new(engine).sort_indices(&input).unwrap();
        verify_permutation(&indices, input.len()).unwrap();
        verify_order(&input, &indices).unwrap();
    }
}

#[test]
fn test_fuzz_random() {
    let mut rng = rand::rng();
    let input: Vec<Vec<u8>> = (0..10_000)
        .map(|_| {
            let len = rng.random_range(0..24);
            (0..len).map(|_| rng.random_range(1..=255u8)).collect()
        })
        .collect();

    for engine in Engine::ALL.into_iter().filter(|&e| e != Engine::Insertion) {
        assert_sorts_like_oracle(engine, &input);
    }
}

#[test]
fn test_fuzz_small_alphabet_mut() {
    let mut rng = rand::rng();
    let alphabet = b"aAbB";

    for _ in 0..2_000 {
        let count = rng.random_range(0..64);
        let input: Vec<String> = (0..count)
            .map(|_| {
                let len = rng.random_range(0..10);
                (0..len).map(|_| alphabet[rng.random_range(0..alphabet.len())] as char).collect()
            })
            .collect();

        let engine = Engine::ALL[rng.random_range(0..Engine::ALL.len())];
        assert_sorts_like_oracle(engine, &input);
    }
}

#[test]
fn test_fuzz_tiny_thresholds() {
    // Force every partitioning and fallback path on modest inputs.
    let mut rng = rand::rng();
    let input: Vec<String> = (0..3_000)
        .map(|_| {
            let len = rng.random_range(0..16);
            (0..len).map(|_| rng.random_range(b'a'..=b'f') as char).collect()
        })
        .collect();
    let expected = expected_order(&input);

    for engine in Engine::ALL.into_iter().filter(|&e| e != Engine::Insertion) {
        for threshold in [0, 2, 5, 64] {
            let sorter = Sorter::new(engine)
                .with_small_bucket_threshold(threshold)
                .with_insertion_threshold(threshold);
            let mut data = input.clone();
            sorter.sort(&mut data).unwrap();
            let actual: Vec<Vec<u8>> = data.iter().map(|s| folded(s.as_bytes())).collect();
            assert_eq!(actual, expected, "engine {} threshold {}", engine.name(), threshold);
        }
    }
}

#[test]
fn test_references_are_permuted_not_copied() {
    let owned: Vec<String> = ["delta", "Alpha", "charlie", "BRAVO"].iter().map(|s| s.to_string()).collect();
    let mut refs: Vec<&String> = owned.iter().collect();

    Sorter::new(Engine::Radix(DigitWidth::Two)).sort(&mut refs).unwrap();

    let positions: Vec<usize> = refs
        .iter()
        .map(|r| owned.iter().position(|o| std::ptr::eq(o, *r)).unwrap())
        .collect();
    assert_eq!(positions, vec![1, 3, 2, 0]);
}

#[test]
fn test_vec_deque() {
    use std::collections::VecDeque;
    let input: VecDeque<String> = VecDeque::from(vec![
        "banana".to_string(),
        "Apple".to_string(),
        "cherry".to_string(),
    ]);

    for engine in Engine::ALL {
        let indices = Sorter::new(engine).sort_indices(&input).unwrap();
        let sorted: Vec<&String> = indices.iter().map(|&i| &input[i]).collect();
        assert_eq!(sorted, vec!["Apple", "banana", "cherry"]);
    }
}

#[test]
fn test_default_entry_points() {
    let mut data = vec!["b", "C", "a"];
    sort(&mut data).unwrap();
    assert_eq!(data, vec!["a", "b", "C"]);
    assert_eq!(sort_indices(&data).unwrap(), vec![0, 1, 2]);
    assert_eq!(compare_folded(b"ABC", b"abd"), Ordering::Less);
}

#[test]
fn test_sorter_configuration() {
    let sorter = Sorter::new(Engine::HybridRadixMerge(DigitWidth::Four))
        .with_small_bucket_threshold(300)
        .with_insertion_threshold(12);
    assert_eq!(sorter.engine(), Engine::HybridRadixMerge(DigitWidth::Four));
    assert_eq!(sorter.small_bucket_threshold(), 300);
    assert_eq!(sorter.insertion_threshold(), 12);
    assert_eq!(Sorter::default().engine(), Engine::Radix(DigitWidth::One));
    assert_eq!(Engine::Radix(DigitWidth::Two).name(), "radix2");
}
