//! Built-in scalar types.


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
}

impl Primitive {
    pub const ALL: [Primitive; 9] = [
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Char,
        Primitive::String,
        Primitive::Boolean,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
        }
    }

    pub fn from_name(name: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|p| p.name() == name)
    }

    pub const fn is_numeric(self) -> bool {
        self.is_integral() || self.is_floating()
    }

    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Primitive::Byte | Primitive::Short | Primitive::Int | Primitive::Long
        )
    }

    pub const fn is_floating(self) -> bool {
        matches!(self, Primitive::Float | Primitive::Double)
    }
}
