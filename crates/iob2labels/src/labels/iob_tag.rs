//! # IOB2 Tags

use core::fmt;

/// The placeholder entity type used when no labels are given.
pub const DEFAULT_ENTITY_LABEL: &str = "LABEL";

/// IOB2 tag prefixes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::Display,
)]
pub enum IobPrefix {
    /// Not part of any entity.
    #[strum(serialize = "O")]
    Outside,

    /// The first token of an entity.
    #[strum(serialize = "B")]
    Beginning,

    /// A continuing token of an entity.
    #[strum(serialize = "I")]
    Inside,
}

/// Format an entity tag, e.g. `B-ACTOR`.
///
/// The label is upper-cased; [`IobPrefix::Outside`] has no entity label,
/// and formats as `O`.
pub fn format_entity_label(
    prefix: IobPrefix,
    label: &str,
) -> String {
    match prefix {
        IobPrefix::Outside => IobPrefix::Outside.to_string(),
        _ => format!("{prefix}-{}", label.to_uppercase()),
    }
}

/// A parsed IOB2 tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IobTag {
    /// `O`
    Outside,

    /// `B-<LABEL>`
    Beginning(String),

    /// `I-<LABEL>`
    Inside(String),
}

impl IobTag {
    /// Parse a tag string.
    ///
    /// Returns `None` for anything other than `O`, `B-<LABEL>` or `I-<LABEL>`.
    pub fn parse(tag: &str) -> Option<Self> {
        if tag == "O" {
            return Some(Self::Outside);
        }
        let (prefix, label) = tag.split_once('-')?;
        match prefix.parse::<IobPrefix>().ok()? {
            IobPrefix::Beginning => Some(Self::Beginning(label.to_string())),
            IobPrefix::Inside => Some(Self::Inside(label.to_string())),
            IobPrefix::Outside => None,
        }
    }

    /// The tag prefix.
    pub fn prefix(&self) -> IobPrefix {
        match self {
            Self::Outside => IobPrefix::Outside,
            Self::Beginning(_) => IobPrefix::Beginning,
            Self::Inside(_) => IobPrefix::Inside,
        }
    }

    /// The entity label, if any.
    pub fn entity(&self) -> Option<&str> {
        match self {
            Self::Outside => None,
            Self::Beginning(label) | Self::Inside(label) => Some(label),
        }
    }

    /// Is this a `B-` tag?
    pub fn is_beginning(&self) -> bool {
        matches!(self, Self::Beginning(_))
    }

    /// Is this an `I-` tag for `entity`?
    pub fn is_inside_of(
        &self,
        entity: &str,
    ) -> bool {
        matches!(self, Self::Inside(label) if label == entity)
    }
}

impl fmt::Display for IobTag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Outside => write!(f, "{}", IobPrefix::Outside),
            Self::Beginning(label) => write!(f, "{}-{label}", IobPrefix::Beginning),
            Self::Inside(label) => write!(f, "{}-{label}", IobPrefix::Inside),
        }
    }
}
