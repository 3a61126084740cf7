//! Integration tests for question narrowing and in-place writes
//!
//! Covers:
//! - narrowing succeeds iff the live tag matches the requested shape
//! - field writes land in the foreign record and are seen by every view
//! - C boolean encoding stays within {0, 1}
//! - related records (packages, provider list, dependency)

mod common;

use alpm_bridge::ffi::{
    alpm_question_any_t, alpm_question_install_ignorepkg_t, alpm_question_replace_t,
    alpm_question_select_provider_t,
};
use alpm_bridge::{
    ConversionError, DepMod, InstallIgnorepkg, NarrowError, Narrowed, QuestionAny, QuestionType,
    Replace, SelectProvider,
};
use common::{as_any, depend_record, Chain, FakePackages};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::os::raw::c_void;
use std::ptr;

fn select_provider_record(use_index: i32) -> alpm_question_select_provider_t {
    alpm_question_select_provider_t {
        type_: QuestionType::SelectProvider.as_raw(),
        use_index,
        providers: ptr::null_mut(),
        depend: ptr::null_mut(),
    }
}

fn replace_record() -> alpm_question_replace_t {
    alpm_question_replace_t {
        type_: QuestionType::ReplacePkg.as_raw(),
        replace: 0,
        oldpkg: ptr::null_mut(),
        newpkg: ptr::null_mut(),
        newdb: ptr::null_mut(),
    }
}

fn ignorepkg_record() -> alpm_question_install_ignorepkg_t {
    alpm_question_install_ignorepkg_t {
        type_: QuestionType::InstallIgnorepkg.as_raw(),
        install: 0,
        pkg: ptr::null_mut(),
    }
}

// ============================================================================
// Scenario: select provider
// ============================================================================

#[test]
fn test_select_provider_scenario() {
    let mut raw = select_provider_record(0);
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

    assert_eq!(question.question_type(), QuestionType::SelectProvider);
    assert!(question.narrow::<SelectProvider>().is_ok());
    assert_eq!(
        question.narrow::<Replace>().unwrap_err(),
        NarrowError::WrongVariant {
            expected: QuestionType::ReplacePkg,
            found: QuestionType::SelectProvider,
        }
    );

    let mut provider = question.narrow::<SelectProvider>().unwrap();
    provider.set_use_index(2);
    assert_eq!(provider.use_index(), 2);

    drop(question);
    assert_eq!(raw.use_index, 2);
}

// ============================================================================
// Narrowing matrix
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Target {
    Ignore,
    Replace,
    Provider,
}

fn try_narrow(question: &mut QuestionAny<'_>, target: Target) -> Result<(), NarrowError> {
    match target {
        Target::Ignore => question.narrow::<InstallIgnorepkg>().map(|_| ()),
        Target::Replace => question.narrow::<Replace>().map(|_| ()),
        Target::Provider => question.narrow::<SelectProvider>().map(|_| ()),
    }
}

fn target_type(target: Target) -> QuestionType {
    match target {
        Target::Ignore => QuestionType::InstallIgnorepkg,
        Target::Replace => QuestionType::ReplacePkg,
        Target::Provider => QuestionType::SelectProvider,
    }
}

#[rstest]
fn test_narrow_matrix(
    #[values(
        QuestionType::InstallIgnorepkg,
        QuestionType::ReplacePkg,
        QuestionType::ConflictPkg,
        QuestionType::CorruptedPkg,
        QuestionType::RemovePkgs,
        QuestionType::SelectProvider,
        QuestionType::ImportKey,
        QuestionType::Unknown(1024)
    )]
    live: QuestionType,
    #[values(Target::Ignore, Target::Replace, Target::Provider)] target: Target,
) {
    // Largest shape, so any reinterpretation stays in bounds
    let mut raw = replace_record();
    raw.type_ = live.as_raw();
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

    let expected = target_type(target);
    let result = try_narrow(&mut question, target);

    if live == expected {
        assert_eq!(result, Ok(()));
    } else {
        assert_eq!(
            result,
            Err(NarrowError::WrongVariant {
                expected,
                found: live,
            })
        );
    }
}

#[test]
fn test_narrow_rereads_live_tag() {
    let mut raw = replace_record();
    let ptr = as_any(&mut raw);
    let mut question = unsafe { QuestionAny::from_raw(ptr) }.unwrap();

    assert!(question.replace().is_ok());

    // The owner repurposes the record behind the view's back
    unsafe { (*ptr).type_ = QuestionType::InstallIgnorepkg.as_raw() };

    assert!(question.replace().is_err());
    assert!(question.install_ignorepkg().is_ok());
}

#[test]
fn test_classify_picks_shape() {
    let mut raw = ignorepkg_record();
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

    match question.classify() {
        Narrowed::InstallIgnorepkg(mut q) => q.set_install(true),
        other => panic!("expected install-ignorepkg, got {:?}", other),
    }
    assert_eq!(raw.install, 1);
}

// ============================================================================
// Writes through views
// ============================================================================

#[test]
fn test_narrowed_write_visible_to_generic_view() {
    let mut raw = replace_record();
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

    question.replace().unwrap().set_replace(true);

    // `replace` shares the answer slot
    assert!(question.answer());
    assert!(question.replace().unwrap().replace());
}

#[test]
fn test_generic_answer_visible_to_narrowed_view() {
    let mut raw = ignorepkg_record();
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

    question.set_answer(true);
    assert!(question.install_ignorepkg().unwrap().install());
}

#[test]
fn test_nonzero_foreign_flag_reads_true() {
    let mut raw = ignorepkg_record();
    raw.install = 42;
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

    assert!(question.install_ignorepkg().unwrap().install());
}

proptest! {
    #[test]
    fn prop_flag_round_trip_and_encoding(values in prop::collection::vec(any::<bool>(), 1..20)) {
        let mut raw = replace_record();
        let ptr = as_any(&mut raw);

        for value in &values {
            let mut question = unsafe { QuestionAny::from_raw(ptr) }.unwrap();
            question.replace().unwrap().set_replace(*value);

            // fresh narrow over the same address
            prop_assert_eq!(question.replace().unwrap().replace(), *value);
            let stored = unsafe { (*ptr).answer };
            prop_assert!(stored == 0 || stored == 1);
            prop_assert_eq!(stored, i32::from(*value));
        }
    }

    #[test]
    fn prop_use_index_round_trip(index in any::<i32>()) {
        let mut raw = select_provider_record(0);
        let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

        question.select_provider().unwrap().set_use_index(index);
        prop_assert_eq!(question.select_provider().unwrap().use_index(), index);
    }
}

// ============================================================================
// Related records
// ============================================================================

#[test]
fn test_select_provider_related_records() {
    let mut packages = FakePackages::new(2);
    let payloads = packages.payloads(2);
    let chain = Chain::new(payloads.clone());
    let (_strings, mut depend) = depend_record("sh", "", DepMod::Any.as_raw());

    let mut raw = select_provider_record(0);
    raw.providers = chain.head();
    raw.depend = &mut *depend;
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();
    let provider = question.select_provider().unwrap();

    let providers = provider.providers();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers.collect()[1].as_ptr().cast::<c_void>(), payloads[1]);

    let dep = provider.depend().unwrap();
    assert_eq!(dep.name, "sh");
    assert_eq!(dep.modifier, DepMod::Any);
}

#[test]
fn test_select_provider_without_depend() {
    let mut raw = select_provider_record(0);
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();
    let provider = question.select_provider().unwrap();

    assert!(provider.providers().is_empty());
    assert_eq!(
        provider.depend(),
        Err(ConversionError::NullRecord { record: "depend" })
    );
}

#[test]
fn test_replace_packages() {
    let mut packages = FakePackages::new(2);
    let old = packages.handle(0);
    let new = packages.handle(1);
    let mut raw = replace_record();
    raw.oldpkg = old;
    raw.newpkg = new;
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();
    let replace = question.replace().unwrap();

    assert_eq!(replace.old_pkg().map(|p| p.as_ptr()), Some(old));
    assert_eq!(replace.new_pkg().map(|p| p.as_ptr()), Some(new));
    assert!(replace.new_db().is_none());
}

#[test]
fn test_ignorepkg_without_package() {
    let mut raw = ignorepkg_record();
    let mut question = unsafe { QuestionAny::from_raw(as_any(&mut raw)) }.unwrap();

    assert!(question.install_ignorepkg().unwrap().pkg().is_none());
}

#[test]
fn test_generic_record_only() {
    let mut raw = alpm_question_any_t {
        type_: QuestionType::ImportKey.as_raw(),
        answer: 0,
    };
    let mut question = unsafe { QuestionAny::from_raw(&mut raw) }.unwrap();

    assert!(matches!(
        question.classify(),
        Narrowed::Other(QuestionType::ImportKey)
    ));
    question.set_answer(true);
    assert!(question.answer());
}
