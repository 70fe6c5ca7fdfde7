//! Stage factory: descriptor in, validated [`TransformStage`] out.
//!
//! Creation runs in three passes, each of which may reject the descriptor:
//!
//! 1. **Lookup** - the kind is matched case-insensitively against
//!    [`OperationKind`].
//! 2. **Normalization** - a generic `value` parameter is renamed to the
//!    kind's canonical scalar parameter unless that name is already present.
//! 3. **Validation** - required parameters, numeric types and unknown names
//!    are checked before the stage constructor runs its range checks.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::descriptor::{OperationDescriptor, ParamValue};
use super::stage::TransformStage;
use crate::error::{EditError, EditResult};
use crate::filters::{Brightness, BoxBlur, Contrast, Saturation, Sharpen, Sobel};

/// Generic parameter name accepted by single-parameter operations.
pub const VALUE_ALIAS: &str = "value";

/// Registry of supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Box,
    Sobel,
    Sharpen,
    Brightness,
    Contrast,
    Saturation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamType {
    Int,
    Float,
}

#[derive(Debug, Clone, Copy)]
struct ParamSpec {
    name: &'static str,
    ty: ParamType,
}

const BOX_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "width",
        ty: ParamType::Int,
    },
    ParamSpec {
        name: "height",
        ty: ParamType::Int,
    },
];
const AMOUNT_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "amount",
    ty: ParamType::Float,
}];
const FACTOR_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "factor",
    ty: ParamType::Float,
}];

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        Self::Box,
        Self::Sobel,
        Self::Sharpen,
        Self::Brightness,
        Self::Contrast,
        Self::Saturation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sobel => "sobel",
            Self::Sharpen => "sharpen",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(kind: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(kind))
    }

    /// Canonical parameter that `value` is renamed to, if any.
    pub fn value_alias_target(self) -> Option<&'static str> {
        match self {
            Self::Sharpen => Some("amount"),
            Self::Brightness | Self::Contrast | Self::Saturation => Some("factor"),
            Self::Box | Self::Sobel => None,
        }
    }

    /// Every listed parameter is required.
    fn params(self) -> &'static [ParamSpec] {
        match self {
            Self::Box => BOX_PARAMS,
            Self::Sobel => &[],
            Self::Sharpen => AMOUNT_PARAMS,
            Self::Brightness | Self::Contrast | Self::Saturation => FACTOR_PARAMS,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters that passed validation, keyed by canonical name.
struct Validated {
    kind: OperationKind,
    params: BTreeMap<String, ParamValue>,
}

impl Validated {
    fn int(&self, name: &str) -> EditResult<i64> {
        self.params
            .get(name)
            .and_then(ParamValue::as_i64)
            .ok_or_else(|| EditError::missing(self.kind.name(), name))
    }

    fn float(&self, name: &str) -> EditResult<f64> {
        self.params
            .get(name)
            .and_then(ParamValue::as_f64)
            .ok_or_else(|| EditError::missing(self.kind.name(), name))
    }
}

/// Builds transform stages from descriptors.
#[derive(Debug, Default, Clone, Copy)]
pub struct StageFactory;

impl StageFactory {
    /// Names of every supported operation, in registry order.
    pub fn supported_kinds() -> Vec<&'static str> {
        OperationKind::ALL.iter().map(|k| k.name()).collect()
    }

    /// Look up, normalize, validate and construct one stage.
    pub fn create(descriptor: OperationDescriptor) -> EditResult<TransformStage> {
        let OperationDescriptor { kind, parameters } = descriptor;
        let kind = OperationKind::parse(&kind).ok_or(EditError::UnknownOperation(kind))?;

        let params = normalize(kind, parameters);
        let validated = validate(kind, params)?;
        let stage = construct(&validated)?;

        debug!(stage = %stage, "stage constructed");
        Ok(stage)
    }
}

/// Rename `value` to the canonical scalar name. The canonical name wins when
/// both are supplied.
fn normalize(kind: OperationKind, mut params: BTreeMap<String, ParamValue>) -> BTreeMap<String, ParamValue> {
    let Some(target) = kind.value_alias_target() else {
        return params;
    };
    if let Some(value) = params.remove(VALUE_ALIAS) {
        if params.contains_key(target) {
            debug!(kind = %kind, canonical = target, "ignoring 'value' in favour of canonical parameter");
        } else {
            params.insert(target.to_string(), value);
        }
    }
    params
}

fn validate(kind: OperationKind, params: BTreeMap<String, ParamValue>) -> EditResult<Validated> {
    let specs = kind.params();

    if let Some(name) = params.keys().find(|name| !specs.iter().any(|s| s.name == name.as_str())) {
        return Err(EditError::UnexpectedParameter {
            kind: kind.name().to_string(),
            name: name.clone(),
        });
    }

    for spec in specs {
        let Some(value) = params.get(spec.name) else {
            return Err(match kind.value_alias_target() {
                Some(target) if target == spec.name => EditError::missing(
                    kind.name(),
                    &format!("{target}' or '{VALUE_ALIAS}"),
                ),
                _ => EditError::missing(kind.name(), spec.name),
            });
        };
        let ok = match spec.ty {
            ParamType::Int => value.as_i64().is_some(),
            ParamType::Float => value.as_f64().is_some(),
        };
        if !ok {
            let expected = match spec.ty {
                ParamType::Int => "an integer",
                ParamType::Float => "a number",
            };
            return Err(EditError::invalid(
                kind.name(),
                spec.name,
                format!("expected {expected}, got {} {value}", value.type_name()),
            ));
        }
    }

    Ok(Validated { kind, params })
}

fn construct(v: &Validated) -> EditResult<TransformStage> {
    let stage: TransformStage = match v.kind {
        OperationKind::Box => BoxBlur::new(v.int("width")?, v.int("height")?)?.into(),
        OperationKind::Sobel => Sobel::new().into(),
        OperationKind::Sharpen => Sharpen::new(v.float("amount")?)?.into(),
        OperationKind::Brightness => Brightness::new(v.float("factor")?)?.into(),
        OperationKind::Contrast => Contrast::new(v.float("factor")?)?.into(),
        OperationKind::Saturation => Saturation::new(v.float("factor")?)?.into(),
    };
    Ok(stage)
}
