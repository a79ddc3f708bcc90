//! Shared test utilities for skemi.

pub mod fixtures;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run every case and report all mismatches together.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    let mut failures = Vec::new();
    for case in cases {
        println!("[TEST] {}: {:?}", case.name, case.input);
        let actual = test_fn(case.input);
        if actual == case.expected {
            println!("[TEST] PASSED: {}", case.name);
        } else {
            failures.push(format!(
                "'{}': expected {:?}, got {:?}",
                case.name, case.expected, actual
            ));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} case(s) failed:\n{}", failures.len(), failures.join("\n")))
    }
}
