use sea_orm::sea_query::{Expr, SimpleExpr};

/// Column types the storefront tables use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String(u32),
    Text,
    Boolean,
    Timestamp,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Integer(i64),
    String(&'static str),
    Boolean(bool),
}

impl DefaultValue {
    pub fn to_expr(&self) -> SimpleExpr {
        match self {
            DefaultValue::Integer(v) => Expr::val(*v).into(),
            DefaultValue::String(v) => Expr::val(*v).into(),
            DefaultValue::Boolean(v) => Expr::val(*v).into(),
        }
    }
}

/// Row-level CHECK constraint attached to a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Between(i64, i64),
    AtLeast(i64),
    Length(usize),
}

/// What happens to referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    /// No constraint is emitted; the reference may dangle.
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub table: &'static str,
    pub on_delete: OnDelete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
    pub nullable: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
    pub check: Option<Check>,
    pub references: Option<Reference>,
}

impl FieldDef {
    pub fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            unique: false,
            default: None,
            check: None,
            references: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn check(mut self, check: Check) -> Self {
        self.check = Some(check);
        self
    }

    pub fn references(mut self, table: &'static str, on_delete: OnDelete) -> Self {
        self.references = Some(Reference { table, on_delete });
        self
    }
}

pub fn integer(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::Integer)
}

pub fn string(name: &'static str, len: u32) -> FieldDef {
    FieldDef::new(name, FieldType::String(len))
}

pub fn text(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::Text)
}

pub fn boolean(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::Boolean)
}

pub fn timestamp(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::Timestamp)
}

pub fn date(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::Date)
}

/// Integer column pointing at `table.id`.
pub fn foreign_key(name: &'static str, table: &'static str, on_delete: OnDelete) -> FieldDef {
    integer(name).references(table, on_delete)
}

/// A table: an implicit auto-increment `id` plus the declared fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDef {
    pub table: &'static str,
    pub fields: Vec<FieldDef>,
    pub unique_together: Vec<Vec<&'static str>>,
}

impl EntityDef {
    pub const PRIMARY_KEY: &'static str = "id";

    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            fields: Vec::new(),
            unique_together: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn unique_together(mut self, columns: &[&'static str]) -> Self {
        self.unique_together.push(columns.to_vec());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldDef> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// `id` followed by every declared field, in declaration order.
    pub fn column_names(&self) -> Vec<&'static str> {
        std::iter::once(Self::PRIMARY_KEY)
            .chain(self.fields.iter().map(|f| f.name))
            .collect()
    }
}
