use std::fmt;

///
/// FieldModel
/// Runtime attribute metadata used by resolution, coercion, and shaping.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Rust field name; the key used by generated accessors.
    pub name: &'static str,
    /// Name clients use in filter, sort, and fields parameters.
    pub public_name: &'static str,
    pub kind: FieldKind,
    /// Whether the attribute is declared as `Option<_>`.
    pub nullable: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn new(
        name: &'static str,
        public_name: &'static str,
        kind: FieldKind,
        nullable: bool,
    ) -> Self {
        Self {
            name,
            public_name,
            kind,
            nullable,
        }
    }

    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        FieldType {
            kind: self.kind,
            nullable: self.nullable,
        }
    }
}

///
/// EnumModel
/// Declared variants of an enum attribute, in declaration order.
///

#[derive(Debug, Eq, PartialEq)]
pub struct EnumModel {
    pub path: &'static str,
    pub variants: &'static [&'static str],
}

impl EnumModel {
    #[must_use]
    pub fn ordinal(&self, variant: &str) -> Option<u32> {
        self.variants
            .iter()
            .position(|candidate| *candidate == variant)
            .and_then(|index| u32::try_from(index).ok())
    }
}

///
/// FieldKind
///
/// Declared scalar type of an attribute. Integer widths are kept so literal
/// coercion can range-check before widening into `Value`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Date,
    Enum(&'static EnumModel),
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Text,
    Timestamp,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Ulid,
}

impl FieldKind {
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        !matches!(self, Self::Bool)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Enum(model) => model.path,
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint8 => "u8",
            Self::Uint16 => "u16",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Ulid => "ulid",
        };

        write!(f, "{label}")
    }
}

///
/// FieldType
/// Declared kind plus nullability; the coercion target for literals.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldType {
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldType {
    #[must_use]
    pub const fn new(kind: FieldKind, nullable: bool) -> Self {
        Self { kind, nullable }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
