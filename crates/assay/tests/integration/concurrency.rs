//! Shared-registry concurrency: parallel validations must match
//! sequential results, with no duplicate semantic effect from cache races.

use std::sync::Arc;

use assay::prelude::*;
use pretty_assertions::assert_eq;

#[derive(Validatable)]
struct Job {
    #[validate("required,minlen=3")]
    name: String,
    #[validate("range=1:64")]
    workers: i64,
    #[validate("dive,minlen=1")]
    args: Vec<String>,
}

fn job(index: i64) -> Job {
    Job {
        // Even indices violate minlen, odd ones are fine.
        name: if index % 2 == 0 {
            "ab".into()
        } else {
            "worker".into()
        },
        workers: index,
        args: vec!["--verbose".into()],
    }
}

fn outcome(validator: &Validator, value: &Job) -> Option<Vec<(String, String)>> {
    match validator.validate(value) {
        Ok(()) => None,
        Err(ValidateError::Invalid(v)) => Some(
            v.iter()
                .map(|violation| (violation.path.clone(), violation.rule.clone()))
                .collect(),
        ),
        Err(ValidateError::Config(c)) => panic!("unexpected config error: {c}"),
    }
}

#[test]
fn concurrent_validation_matches_sequential() {
    let validator = Arc::new(Validator::new());

    let sequential: Vec<_> = (0..64).map(|i| outcome(&validator, &job(i))).collect();

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let validator = Arc::clone(&validator);
            std::thread::spawn(move || outcome(&validator, &job(i)))
        })
        .collect();
    let parallel: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn registry_cache_is_shared_across_threads() {
    let validator = Arc::new(Validator::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let validator = Arc::clone(&validator);
            std::thread::spawn(move || {
                for i in 0..32 {
                    let _ = validator.validate(&job(i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // One distinct (rule, parameter) pair per lane used by `Job`:
    // minlen=3, range=1:64, minlen=1. Races overwrite, they never add.
    assert_eq!(validator.registry().cached_instances(), 3);

    let first = validator.registry().resolve::<str>("minlen", "3").unwrap();
    let second = validator.registry().resolve::<str>("minlen", "3").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn second_resolution_is_reference_identical() {
    let validator = Validator::new();
    let registry = validator.registry();

    let first = registry.resolve::<i64>("range_int", "1:64").unwrap();
    let second = registry.resolve::<i64>("range_int", "1:64").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
