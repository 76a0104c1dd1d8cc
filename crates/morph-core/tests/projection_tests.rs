//! Functional tests for conventional and overridden projections.
//!
//! Core guarantees exercised here:
//! - Same-named parameters of identical type are copied verbatim.
//! - Same-named parameters of compatible type are converted by the registry.
//! - A null value is omitted for optional parameters (the target's default
//!   applies), passed through for nullable ones, and rejected otherwise.
//! - A null set by an override reaches nullable parameters even when they
//!   have a default.
//! - Overrides by literal, action, converter or source attribute replace the
//!   conventional binding, addressed either by typed property or by name.
//! - Types without a registered converter still project when identical.

use morph_core::prelude::*;
use morph_core::{ConfigurationError, ProjectionErrorKind};
use morph_convert::{share, BigInt, ConversionErrorKind, Uuid};
use morph_test_utils::{
    Child, CompatibleNonNullableOptionalTarget, CompatibleNonNullableTarget,
    CompatibleNullableOptionalTarget, CompatibleNullableTarget, IncompatibleMultiArgSource,
    IncompatibleSingleArgSource, IncompatibleSingleArgTarget, NonNullableOptionalTarget,
    NonNullableSource, NonNullableTarget, NullableOptionalTarget, NullableSource, NullableTarget,
    ParentSource, ParentTarget, UnmatchedNameTarget, UuidToBigIntConverter,
};
use std::sync::Arc;

fn ten_to_the_ten() -> BigInt {
    BigInt::from(10_000_000_000i64)
}

fn multi_arg_source() -> IncompatibleMultiArgSource {
    IncompatibleMultiArgSource {
        value: 10,
        power: 10,
    }
}

fn raised(source: &IncompatibleMultiArgSource) -> BigInt {
    BigInt::from(source.value).pow(u32::try_from(source.power).unwrap())
}

// ---------------------------------------------------------------------------
// Identical types
// ---------------------------------------------------------------------------

/// Tenet: identical non-nullable parameters are copied as-is.
#[test]
fn identical_non_nullable_parameters() {
    let result: NonNullableTarget = project(&NonNullableSource { a: 123 }).unwrap();
    assert_eq!(result, NonNullableTarget { a: 123 });
}

#[test]
fn identical_nullable_parameters_with_a_value() {
    let result: NullableTarget = project(&NullableSource { a: Some(123) }).unwrap();
    assert_eq!(result, NullableTarget { a: Some(123) });
}

#[test]
fn identical_nullable_parameters_without_a_value() {
    let result: NullableTarget = project(&NullableSource { a: None }).unwrap();
    assert_eq!(result, NullableTarget { a: None });
}

#[test]
fn non_nullable_parameter_to_nullable_parameter() {
    let result: NullableTarget = project(&NonNullableSource { a: 123 }).unwrap();
    assert_eq!(result, NullableTarget { a: Some(123) });
}

/// Tenet: a present value always wins over the target's default.
#[test]
fn nullable_to_non_nullable_optional_with_a_value() {
    let result: NonNullableOptionalTarget = project(&NullableSource { a: Some(456) }).unwrap();
    assert_eq!(result, NonNullableOptionalTarget { a: 456 });
}

/// Tenet: a null value is omitted so the target's default applies.
#[test]
fn nullable_to_non_nullable_optional_without_a_value() {
    let result: NonNullableOptionalTarget = project(&NullableSource { a: None }).unwrap();
    assert_eq!(result, NonNullableOptionalTarget { a: 123 });
}

#[test]
fn nullable_to_nullable_optional_with_a_value() {
    let result: NullableOptionalTarget = project(&NullableSource { a: Some(456) }).unwrap();
    assert_eq!(result, NullableOptionalTarget { a: Some(456) });
}

/// Tenet: optionality is checked before nullability.
///
/// A nullable parameter with a default receives the default, not null, when
/// the source value is null.
#[test]
fn nullable_to_nullable_optional_without_a_value() {
    let result: NullableOptionalTarget = project(&NullableSource { a: None }).unwrap();
    assert_eq!(result, NullableOptionalTarget { a: Some(123) });
}

/// Tenet: null never reaches a required, non-nullable parameter.
#[test]
fn nullable_to_non_nullable_is_rejected() {
    let err = project::<NonNullableTarget, _>(&NullableSource { a: None }).unwrap_err();

    assert_eq!(err.kind(), ProjectionErrorKind::MissingRequiredValue);
    assert_eq!(
        err.to_string(),
        "cannot project 'null' to the non-optional and non-nullable parameter 'a'"
    );
}

// ---------------------------------------------------------------------------
// Compatible types
// ---------------------------------------------------------------------------

#[test]
fn compatible_non_nullable_parameters() {
    let result: CompatibleNonNullableTarget = project(&NonNullableSource { a: 123 }).unwrap();
    assert_eq!(result, CompatibleNonNullableTarget { a: 123 });
}

#[test]
fn compatible_nullable_parameters_with_a_value() {
    let result: CompatibleNullableTarget = project(&NullableSource { a: Some(123) }).unwrap();
    assert_eq!(result, CompatibleNullableTarget { a: Some(123) });
}

#[test]
fn compatible_nullable_parameters_without_a_value() {
    let result: CompatibleNullableTarget = project(&NullableSource { a: None }).unwrap();
    assert_eq!(result, CompatibleNullableTarget { a: None });
}

#[test]
fn compatible_non_nullable_parameter_to_nullable_parameter() {
    let result: CompatibleNullableTarget = project(&NonNullableSource { a: 123 }).unwrap();
    assert_eq!(result, CompatibleNullableTarget { a: Some(123) });
}

#[test]
fn compatible_nullable_to_non_nullable_optional() {
    let with: CompatibleNonNullableOptionalTarget =
        project(&NullableSource { a: Some(456) }).unwrap();
    let without: CompatibleNonNullableOptionalTarget =
        project(&NullableSource { a: None }).unwrap();

    assert_eq!(with, CompatibleNonNullableOptionalTarget { a: 456 });
    assert_eq!(without, CompatibleNonNullableOptionalTarget { a: 123 });
}

#[test]
fn compatible_nullable_to_nullable_optional() {
    let with: CompatibleNullableOptionalTarget =
        project(&NullableSource { a: Some(456) }).unwrap();
    let without: CompatibleNullableOptionalTarget =
        project(&NullableSource { a: None }).unwrap();

    assert_eq!(with, CompatibleNullableOptionalTarget { a: Some(456) });
    assert_eq!(without, CompatibleNullableOptionalTarget { a: Some(123) });
}

#[test]
fn compatible_nullable_to_non_nullable_is_rejected() {
    let err = project::<CompatibleNonNullableTarget, _>(&NullableSource { a: None }).unwrap_err();

    assert_eq!(err.kind(), ProjectionErrorKind::MissingRequiredValue);
    assert_eq!(err.parameter(), Some("a"));
}

/// Tenet: conversion failures name the parameter and both types.
#[test]
fn incompatible_parameters_fail_without_an_override() {
    let source = IncompatibleSingleArgSource {
        value: Uuid::nil(),
    };
    let err = project::<IncompatibleSingleArgTarget, _>(&source).unwrap_err();

    assert_eq!(err.kind(), ProjectionErrorKind::ConversionFailed);
    assert_eq!(err.parameter(), Some("value"));
    assert_eq!(
        err.conversion().map(ConversionError::kind),
        Some(ConversionErrorKind::Unsupported)
    );
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

#[test]
fn custom_projection_value() {
    let source = multi_arg_source();
    let result: IncompatibleSingleArgTarget = project_with(&source, |builder| {
        let value = raised(builder.subject());
        builder.bind_value(IncompatibleSingleArgTarget::VALUE, value)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result.value, ten_to_the_ten());
}

#[test]
fn custom_projection_action() {
    let result: IncompatibleSingleArgTarget = project_with(&multi_arg_source(), |builder| {
        builder.bind_with(IncompatibleSingleArgTarget::VALUE, raised)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result.value, ten_to_the_ten());
}

/// Tenet: a converter override keeps the conventional value.
#[test]
fn custom_type_converter() {
    let source = IncompatibleSingleArgSource {
        value: Uuid::parse_str("00000000-0000-0000-0000-00000000000A").unwrap(),
    };
    let result: IncompatibleSingleArgTarget = project_with(&source, |builder| {
        builder.bind_converter(IncompatibleSingleArgTarget::VALUE, UuidToBigIntConverter)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result.value, BigInt::from(10));
}

#[test]
fn custom_projection_value_using_string_name() {
    let source = multi_arg_source();
    let result: IncompatibleSingleArgTarget = project_with(&source, |builder| {
        let value = raised(builder.subject());
        builder.bind_value("value", value)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result.value, ten_to_the_ten());
}

#[test]
fn custom_projection_action_using_string_name() {
    let result: IncompatibleSingleArgTarget = project_with(&multi_arg_source(), |builder| {
        builder.bind_with("value", raised)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result.value, ten_to_the_ten());
}

#[test]
fn custom_type_converter_using_string_name() {
    let source = IncompatibleSingleArgSource {
        value: Uuid::parse_str("00000000-0000-0000-0000-00000000000A").unwrap(),
    };
    let result: IncompatibleSingleArgTarget = project_with(&source, |builder| {
        builder.bind_converter("value", UuidToBigIntConverter)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result.value, BigInt::from(10));
}

/// Tenet: one shared converter instance serves any number of projections.
#[test]
fn custom_shared_type_converter() {
    let converter = share(UuidToBigIntConverter);

    for bits in [10u128, 255] {
        let source = IncompatibleSingleArgSource {
            value: Uuid::from_u128(bits),
        };
        let shared = Arc::clone(&converter);
        let result: IncompatibleSingleArgTarget = project_with(&source, |builder| {
            builder.bind_shared_converter(IncompatibleSingleArgTarget::VALUE, shared)?;
            Ok(())
        })
        .unwrap();

        assert_eq!(result.value, BigInt::from(bits));
    }

    assert_eq!(Arc::strong_count(&converter), 1);
}

/// Tenet: differently named attributes bind explicitly.
#[test]
fn parameters_with_different_names() {
    let result: UnmatchedNameTarget = project_with(&NonNullableSource { a: 456 }, |builder| {
        builder.bind_attribute(UnmatchedNameTarget::B, NonNullableSource::A)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result, UnmatchedNameTarget { b: 456 });
}

#[test]
fn parameters_with_different_names_using_string_name() {
    let result: UnmatchedNameTarget = project_with(&NonNullableSource { a: 456 }, |builder| {
        builder.bind_attribute("b", "a")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result, UnmatchedNameTarget { b: 456 });
}

#[test]
fn unmatched_names_without_an_override_are_missing() {
    let err = project::<UnmatchedNameTarget, _>(&NonNullableSource { a: 456 }).unwrap_err();
    assert_eq!(err.kind(), ProjectionErrorKind::MissingRequiredValue);
    assert_eq!(err.parameter(), Some("b"));
}

#[test]
fn null_override_reaches_nullable_parameter() {
    let result: NullableTarget = project_with(&NonNullableSource { a: 123 }, |builder| {
        builder.bind_null("a")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result, NullableTarget { a: None });
}

/// Tenet: an explicit null wins over the default of a nullable parameter.
#[test]
fn null_override_reaches_nullable_optional_parameter() {
    let result: NullableOptionalTarget = project_with(&NullableSource { a: Some(5) }, |builder| {
        builder.bind_null("a")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result, NullableOptionalTarget { a: None });
}

#[test]
fn absent_action_result_reaches_nullable_optional_parameter() {
    let result: NullableOptionalTarget = project_with(&NullableSource { a: Some(5) }, |builder| {
        builder.bind_optional_with("a", |s: &NullableSource| s.a.filter(|a| *a > 10))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(result, NullableOptionalTarget { a: None });
}

#[test]
fn null_attribute_override_reaches_nullable_optional_parameter() {
    let source = NullableSource { a: None };

    let conventional: NullableOptionalTarget = project(&source).unwrap();
    assert_eq!(conventional, NullableOptionalTarget { a: Some(123) });

    let overridden: NullableOptionalTarget = project_with(&source, |builder| {
        builder.bind_attribute("a", "a")?;
        Ok(())
    })
    .unwrap();
    assert_eq!(overridden, NullableOptionalTarget { a: None });
}

/// Tenet: a non-nullable parameter never receives null; its default applies.
#[test]
fn null_override_on_non_nullable_optional_parameter_takes_default() {
    let result: NonNullableOptionalTarget =
        project_with(&NullableSource { a: Some(5) }, |builder| {
            builder.bind_null("a")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(result, NonNullableOptionalTarget { a: 123 });
}

#[test]
fn overriding_an_unknown_parameter_is_rejected() {
    let err = project_with::<_, NonNullableTarget, _>(&NonNullableSource { a: 1 }, |builder| {
        builder.bind_value("b", 1i32)?;
        Ok(())
    })
    .unwrap_err();

    assert_eq!(err.kind(), ProjectionErrorKind::Configuration);
    assert_eq!(
        err,
        ProjectionError::Configuration(ConfigurationError::UnknownParameter {
            target: "NonNullableTarget".into(),
            name: "b".into(),
        })
    );
    assert_eq!(
        err.to_string(),
        "unknown construction parameter 'b' of 'NonNullableTarget'"
    );
}

/// Tenet: override values are not converted.
///
/// A literal of the wrong type reaches the constructor unchanged and fails
/// there, rather than being silently coerced.
#[test]
fn mistyped_override_fails_at_construction() {
    let err = project_with::<_, NonNullableTarget, _>(&NonNullableSource { a: 1 }, |builder| {
        builder.bind_value("a", 1i64)?;
        Ok(())
    })
    .unwrap_err();

    assert_eq!(err.kind(), ProjectionErrorKind::ConstructionFailed);
}

// ---------------------------------------------------------------------------
// Unregistered types
// ---------------------------------------------------------------------------

/// Tenet: identical types project without any registered converter.
#[test]
fn identical_parameters_without_registered_converter() {
    let source = ParentSource {
        a: Child {
            a: 123,
            b: "Hello, world!".to_string(),
        },
    };
    let result: ParentTarget = project(&source).unwrap();
    assert_eq!(result, ParentTarget { a: source.a });
}

#[test]
fn empty_registry_still_projects_identical_types() {
    let registry = TypeConverterRegistry::empty();
    let result: NonNullableTarget = Projection::new()
        .registry(&registry)
        .project(&NonNullableSource { a: 5 })
        .unwrap();
    assert_eq!(result, NonNullableTarget { a: 5 });

    let err = Projection::<CompatibleNonNullableTarget>::new()
        .registry(&registry)
        .project(&NonNullableSource { a: 5 })
        .unwrap_err();
    assert_eq!(err.kind(), ProjectionErrorKind::ConversionFailed);
}
