//! Turns [`EntityDef`]s into sea-query DDL.

use sea_orm::{
    DbBackend,
    sea_query::{
        Alias, ColumnDef, Expr, ForeignKey, ForeignKeyAction, Func, Index, IndexCreateStatement,
        Table, TableCreateStatement,
    },
};

use super::{Check, EntityDef, FieldDef, FieldType, OnDelete};

pub fn column_def(field: &FieldDef) -> ColumnDef {
    let mut col = ColumnDef::new(Alias::new(field.name));
    match field.ty {
        FieldType::Integer => col.integer(),
        FieldType::String(len) => col.string_len(len),
        FieldType::Text => col.text(),
        FieldType::Boolean => col.boolean(),
        FieldType::Timestamp => col.timestamp_with_time_zone(),
        FieldType::Date => col.date(),
    };
    if field.nullable {
        col.null();
    } else {
        col.not_null();
    }
    if let Some(default) = &field.default {
        col.default(default.to_expr());
    }
    if let Some(check) = field.check {
        let column = Expr::col(Alias::new(field.name));
        let expr = match check {
            Check::Between(min, max) => column.between(min, max),
            Check::AtLeast(min) => column.gte(min),
            Check::Length(len) => Expr::expr(
                Func::cust(Alias::new("LENGTH")).arg(Expr::col(Alias::new(field.name))),
            )
            .eq(len as i64),
        };
        col.check(expr);
    }
    col.to_owned()
}

/// `CREATE TABLE` for `def`, named `table` so rebuilds can target a scratch name.
pub fn create_table(def: &EntityDef, table: &str) -> TableCreateStatement {
    let mut stmt = Table::create();
    stmt.table(Alias::new(table)).col(
        ColumnDef::new(Alias::new(EntityDef::PRIMARY_KEY))
            .integer()
            .not_null()
            .auto_increment()
            .primary_key(),
    );
    for field in &def.fields {
        stmt.col(&mut column_def(field));
        if let Some(reference) = field.references {
            if reference.on_delete == OnDelete::Ignore {
                continue;
            }
            stmt.foreign_key(
                ForeignKey::create()
                    .name(format!("fk-{}-{}", def.table, field.name))
                    .from(Alias::new(table), Alias::new(field.name))
                    .to(
                        Alias::new(reference.table),
                        Alias::new(EntityDef::PRIMARY_KEY),
                    )
                    .on_delete(ForeignKeyAction::Cascade),
            );
        }
    }
    stmt.to_owned()
}

/// Unique indexes, plus a plain index on each unconstrained reference.
pub fn indexes(def: &EntityDef) -> Vec<IndexCreateStatement> {
    let mut out = Vec::new();
    for field in &def.fields {
        if field.unique {
            out.push(index(def.table, &[field.name], true));
        } else if matches!(field.references, Some(r) if r.on_delete == OnDelete::Ignore) {
            out.push(index(def.table, &[field.name], false));
        }
    }
    for columns in &def.unique_together {
        out.push(index(def.table, columns, true));
    }
    out
}

fn index(table: &str, columns: &[&'static str], unique: bool) -> IndexCreateStatement {
    let mut stmt = Index::create();
    stmt.name(format!("idx-{table}-{}", columns.join("-")))
        .table(Alias::new(table));
    for column in columns {
        stmt.col(Alias::new(*column));
    }
    if unique {
        stmt.unique();
    }
    stmt.to_owned()
}

pub fn quote(backend: DbBackend, ident: &str) -> String {
    match backend {
        DbBackend::MySql => format!("`{}`", ident.replace('`', "``")),
        _ => format!("\"{}\"", ident.replace('"', "\"\"")),
    }
}

/// Raw statement dropping a column default; sea-query has no builder for it.
pub fn drop_default(backend: DbBackend, table: &str, column: &str) -> String {
    format!(
        "ALTER TABLE {} ALTER COLUMN {} DROP DEFAULT",
        quote(backend, table),
        quote(backend, column)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DefaultValue, foreign_key, integer, string};
    use sea_orm::sea_query::{PostgresQueryBuilder, SqliteQueryBuilder};

    fn reviews() -> EntityDef {
        EntityDef::new("reviews")
            .field(foreign_key("user_id", "users", OnDelete::Cascade))
            .field(integer("rating").check(Check::Between(1, 5)))
            .unique_together(&["user_id", "rating"])
    }

    #[test]
    fn create_table_carries_checks_and_cascades() {
        let sql = create_table(&reviews(), "reviews").to_string(PostgresQueryBuilder);
        assert!(sql.starts_with(r#"CREATE TABLE "reviews""#), "{sql}");
        assert!(sql.contains("BETWEEN 1 AND 5"), "{sql}");
        assert!(sql.contains("ON DELETE CASCADE"), "{sql}");
    }

    #[test]
    fn ignored_references_get_an_index_but_no_constraint() {
        let def = EntityDef::new("appointments")
            .field(foreign_key("user_id", "users", OnDelete::Ignore));
        let sql = create_table(&def, "appointments").to_string(SqliteQueryBuilder);
        assert!(!sql.contains("FOREIGN KEY"), "{sql}");

        let indexes = indexes(&def);
        assert_eq!(indexes.len(), 1);
        let sql = indexes[0].to_string(SqliteQueryBuilder);
        assert!(!sql.contains("UNIQUE"), "{sql}");
    }

    #[test]
    fn scratch_table_name_is_used_for_rebuilds() {
        let sql = create_table(&reviews(), "reviews__new").to_string(SqliteQueryBuilder);
        assert!(sql.starts_with(r#"CREATE TABLE "reviews__new""#), "{sql}");
    }

    #[test]
    fn defaults_are_rendered() {
        let field = string("phone", 10).default(DefaultValue::String("0"));
        let sql = Table::alter()
            .table(Alias::new("addresses"))
            .add_column(&mut column_def(&field))
            .to_string(PostgresQueryBuilder);
        assert!(sql.contains("DEFAULT '0'"), "{sql}");
        assert!(sql.contains("NOT NULL"), "{sql}");
    }

    #[test]
    fn drop_default_quotes_per_backend() {
        assert_eq!(
            drop_default(DbBackend::Postgres, "orders", "name"),
            r#"ALTER TABLE "orders" ALTER COLUMN "name" DROP DEFAULT"#
        );
        assert_eq!(
            drop_default(DbBackend::MySql, "orders", "name"),
            "ALTER TABLE `orders` ALTER COLUMN `name` DROP DEFAULT"
        );
    }
}
