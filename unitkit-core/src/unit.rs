//! The unit value type and its variants.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt::{Display, Formatter, Result as FmtResult};

use crate::dimension::{BaseUnit, Dimension};
use crate::error::{UnitError, UnitResult};

/// Identifier of the promiscuous unit.
pub const PROMISCUOUS_IDENTIFIER: &str = "promiscuous";

const DIMENSIONLESS_DEFINITION: &str = "1";

/// An immutable measurement unit.
///
/// A `Unit` pairs an optional display identifier with one of the [`UnitKind`] variants. Units are cheap to clone:
/// wrapped units are shared behind an [`Arc`], so any number of scaled or offset units can wrap the same underlying
/// unit.
///
/// Equality compares the variant and its dimensional content only; identifiers are ignored. Numeric fields are
/// compared exactly, and a scaled unit with factor 1 is not equal to the unit it wraps.
///
/// ```rust
/// use unitkit_core::{BaseUnit, Unit};
///
/// let meter = Unit::base(BaseUnit::METER);
/// let km = meter.scale(1000.0).unwrap().clone_with_identifier("km").unwrap();
/// assert_eq!(km.to_string(), "km");
/// assert_eq!(km.definition(), "1000 m");
/// assert!(km.is_convertible(&meter));
/// ```
#[derive(Clone, Debug)]
pub struct Unit {
    identifier: Option<Arc<str>>,
    kind: UnitKind,
}

/// The closed set of unit variants.
#[derive(Clone, Debug, PartialEq)]
pub enum UnitKind {
    /// An independent physical dimension.
    Base(BaseUnit),
    /// A product of base units raised to integer powers. Never holds a single base unit with exponent 1.
    Derived(Dimension),
    /// A base or derived unit multiplied by a factor.
    Scaled(ScaledUnit),
    /// A base, derived or scaled unit shifted by an additive offset.
    Offset(OffsetUnit),
    /// The wildcard unit, convertible with every unit.
    Promiscuous,
}

/// A base or derived unit multiplied by a finite, nonzero factor.
///
/// `value_in_underlying = value_in_scaled * factor`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledUnit {
    factor: f64,
    underlying: Arc<Unit>,
}

impl ScaledUnit {
    /// Multiplicative factor relative to the underlying unit.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// The wrapped base or derived unit.
    #[inline]
    pub fn underlying(&self) -> &Unit {
        &self.underlying
    }
}

/// A base, derived or scaled unit shifted by a finite additive offset.
///
/// The offset is expressed in canonical units of the dimension and is applied after scaling:
/// `canonical = value * factor + offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetUnit {
    offset: f64,
    underlying: Arc<Unit>,
}

impl OffsetUnit {
    /// Additive offset in canonical units.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The wrapped base, derived or scaled unit.
    #[inline]
    pub fn underlying(&self) -> &Unit {
        &self.underlying
    }
}

/// Canonical form of a unit: `canonical = value * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Affine {
    pub(crate) scale: f64,
    pub(crate) offset: f64,
}

impl Affine {
    pub(crate) const IDENTITY: Affine = Affine {
        scale: 1.0,
        offset: 0.0,
    };
}

/// The unwrapped dimensional core of a non-promiscuous unit.
pub(crate) enum Core<'a> {
    Base(&'a BaseUnit),
    Derived(&'a Dimension),
}

impl Core<'_> {
    pub(crate) fn same_dimension(&self, other: &Core<'_>) -> bool {
        match (self, other) {
            (Core::Base(a), Core::Base(b)) => a == b,
            (Core::Derived(a), Core::Derived(b)) => a == b,
            (Core::Base(b), Core::Derived(d)) | (Core::Derived(d), Core::Base(b)) => d.single_base() == Some(*b),
        }
    }

    pub(crate) fn to_dimension(&self) -> Dimension {
        match self {
            Core::Base(base) => Dimension::of((*base).clone()),
            Core::Derived(dimension) => (*dimension).clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────────

impl Unit {
    const fn from_kind(kind: UnitKind) -> Self {
        Self {
            identifier: None,
            kind,
        }
    }

    /// A base unit.
    pub fn base(base: BaseUnit) -> Self {
        Self::from_kind(UnitKind::Base(base))
    }

    /// A derived unit over `dimension`.
    ///
    /// A dimension made of exactly one base unit with exponent 1 yields that base unit, so composition results
    /// compare equal to the base units they reduce to.
    pub fn derived(dimension: Dimension) -> Self {
        match dimension.single_base() {
            Some(base) => Self::base(base.clone()),
            None => Self::from_kind(UnitKind::Derived(dimension)),
        }
    }

    /// The dimensionless unit: a derived unit with no base units.
    ///
    /// Unlike the promiscuous unit it takes part in compatibility checks normally.
    pub const fn dimensionless() -> Self {
        Self::from_kind(UnitKind::Derived(Dimension::dimensionless()))
    }

    /// The promiscuous unit: convertible with any unit and left unchanged by every transform.
    pub fn promiscuous() -> Self {
        Self {
            identifier: Some(Arc::from(PROMISCUOUS_IDENTIFIER)),
            kind: UnitKind::Promiscuous,
        }
    }

    pub(crate) fn scaled(factor: f64, underlying: Unit) -> Self {
        Self::from_kind(UnitKind::Scaled(ScaledUnit {
            factor,
            underlying: Arc::new(underlying),
        }))
    }

    pub(crate) fn offset(offset: f64, underlying: Unit) -> Self {
        Self::from_kind(UnitKind::Offset(OffsetUnit {
            offset,
            underlying: Arc::new(underlying),
        }))
    }

    /// A unit over `dimension` scaled by `factor`; factor 1 yields the plain base or derived unit.
    pub(crate) fn from_parts(dimension: Dimension, factor: f64) -> Self {
        let unit = Self::derived(dimension);
        if factor == 1.0 {
            unit
        } else {
            Self::scaled(factor, unit)
        }
    }

    /// Returns a unit with the same conversion behavior under a new identifier.
    ///
    /// An empty identifier clears the name.
    ///
    /// # Errors
    ///
    /// [`UnitError::ImmutableSingleton`] for the promiscuous unit.
    ///
    /// ```rust
    /// use unitkit_core::{Unit, UnitError};
    ///
    /// let err = Unit::promiscuous().clone_with_identifier("x").unwrap_err();
    /// assert!(matches!(err, UnitError::ImmutableSingleton { .. }));
    /// ```
    pub fn clone_with_identifier(&self, identifier: &str) -> UnitResult<Unit> {
        if self.is_promiscuous() {
            return Err(UnitError::ImmutableSingleton {
                unit: self.to_string(),
                operation: "cloned",
            });
        }
        Ok(Self {
            identifier: if identifier.is_empty() {
                None
            } else {
                Some(Arc::from(identifier))
            },
            kind: self.kind.clone(),
        })
    }
}

impl From<BaseUnit> for Unit {
    fn from(base: BaseUnit) -> Self {
        Self::base(base)
    }
}

impl From<Dimension> for Unit {
    fn from(dimension: Dimension) -> Self {
        Self::derived(dimension)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inspection
// ─────────────────────────────────────────────────────────────────────────────

impl Unit {
    /// The display identifier, if one was assigned.
    #[inline]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// The variant of this unit.
    #[inline]
    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    /// Whether this is the promiscuous unit.
    #[inline]
    pub fn is_promiscuous(&self) -> bool {
        matches!(self.kind, UnitKind::Promiscuous)
    }

    /// Whether this unit has no base-unit exponents. False for the promiscuous unit.
    pub fn is_dimensionless(&self) -> bool {
        matches!(self.core(), Some(Core::Derived(d)) if d.is_dimensionless())
    }

    /// The dimension vector after stripping scale and offset; `None` for the promiscuous unit.
    pub fn dimension(&self) -> Option<Dimension> {
        self.core().map(|core| core.to_dimension())
    }

    /// The unscaled, unoffset unit of the same dimension (the unit itself for base, derived and promiscuous units).
    pub fn absolute(&self) -> Unit {
        match &self.kind {
            UnitKind::Scaled(s) => s.underlying().clone(),
            UnitKind::Offset(o) => o.underlying().absolute(),
            _ => self.clone(),
        }
    }

    /// The unit with any offset removed; non-offset units are returned as is.
    pub fn without_offset(&self) -> Unit {
        match &self.kind {
            UnitKind::Offset(o) => o.underlying().clone(),
            _ => self.clone(),
        }
    }

    /// A textual definition of the unit in terms of its base units, e.g. `"1000 m"` or `"s @ -978307200"`.
    pub fn definition(&self) -> String {
        match &self.kind {
            UnitKind::Base(base) => base.symbol().to_string(),
            UnitKind::Derived(dimension) if dimension.is_dimensionless() => DIMENSIONLESS_DEFINITION.to_string(),
            UnitKind::Derived(dimension) => dimension.to_string(),
            UnitKind::Scaled(s) => match s.underlying().kind() {
                UnitKind::Derived(dimension) if dimension.is_dimensionless() => format!("{}", s.factor),
                _ => format!("{} {}", s.factor, s.underlying().definition()),
            },
            UnitKind::Offset(o) => format!("{} @ {}", o.underlying().definition(), o.offset),
            UnitKind::Promiscuous => PROMISCUOUS_IDENTIFIER.to_string(),
        }
    }

    pub(crate) fn core(&self) -> Option<Core<'_>> {
        match &self.kind {
            UnitKind::Base(base) => Some(Core::Base(base)),
            UnitKind::Derived(dimension) => Some(Core::Derived(dimension)),
            UnitKind::Scaled(s) => s.underlying().core(),
            UnitKind::Offset(o) => o.underlying().core(),
            UnitKind::Promiscuous => None,
        }
    }

    pub(crate) fn canonical_map(&self) -> Affine {
        match &self.kind {
            UnitKind::Scaled(s) => Affine {
                scale: s.factor,
                offset: 0.0,
            },
            UnitKind::Offset(o) => {
                let inner = o.underlying().canonical_map();
                Affine {
                    scale: inner.scale,
                    offset: inner.offset + o.offset,
                }
            }
            _ => Affine::IDENTITY,
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

// Factors and offsets are validated finite at construction, so equality is total.
impl Eq for Unit {}

/// Displays the identifier when one is set, the definition otherwise.
impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.identifier {
            Some(identifier) => f.write_str(identifier),
            None => f.write_str(&self.definition()),
        }
    }
}
