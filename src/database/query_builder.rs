use sqlx::postgres::{PgArguments, PgRow};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// A typed column value; `None` writes SQL NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Uuid(Uuid),
}

/// Ordered list of column assignments for an insert or update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<(&'static str, SqlValue)>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: &'static str, value: SqlValue) -> &mut Self {
        if let Some(slot) = self.columns.iter_mut().find(|(c, _)| *c == column) {
            slot.1 = value;
        } else {
            self.columns.push((column, value));
        }
        self
    }

    pub fn text(&mut self, column: &'static str, value: Option<String>) -> &mut Self {
        self.set(column, SqlValue::Text(value))
    }

    pub fn int(&mut self, column: &'static str, value: Option<i32>) -> &mut Self {
        self.set(column, SqlValue::Int(value))
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(c, _)| *c)
    }

    fn values(&self) -> impl Iterator<Item = &SqlValue> + '_ {
        self.columns.iter().map(|(_, v)| v)
    }
}

/// Generated SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    pub query: String,
    pub params: Vec<SqlValue>,
}

impl SqlStatement {
    /// Execute, decoding the single returned row.
    pub async fn fetch_one<T>(&self, conn: &mut sqlx::PgConnection) -> Result<T, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut q = sqlx::query_as::<_, T>(&self.query);
        for p in self.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_one(conn).await?)
    }

    /// Execute, decoding the returned row if there is one.
    pub async fn fetch_optional<T>(&self, conn: &mut sqlx::PgConnection) -> Result<Option<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut q = sqlx::query_as::<_, T>(&self.query);
        for p in self.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_optional(conn).await?)
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `INSERT INTO table (owner, cols...) VALUES (...) RETURNING *`
pub fn insert_owned(table: &str, owner_column: &'static str, owner: Uuid, columns: &ColumnSet) -> SqlStatement {
    let mut names = vec![quote_identifier(owner_column)];
    names.extend(columns.names().map(quote_identifier));

    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("${}", i)).collect();

    let mut params = vec![SqlValue::Uuid(owner)];
    params.extend(columns.values().cloned());

    SqlStatement {
        query: format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            quote_identifier(table),
            names.join(", "),
            placeholders.join(", ")
        ),
        params,
    }
}

/// `UPDATE table SET cols..., updated_at = now() WHERE id = $1 AND owner = $2 RETURNING *`
pub fn update_owned(
    table: &str,
    owner_column: &'static str,
    owner: Uuid,
    id: Uuid,
    columns: &ColumnSet,
) -> SqlStatement {
    let mut assignments: Vec<String> = columns
        .names()
        .enumerate()
        .map(|(i, name)| format!("{} = ${}", quote_identifier(name), i + 3))
        .collect();
    assignments.push("\"updated_at\" = now()".to_string());

    let mut params = vec![SqlValue::Uuid(id), SqlValue::Uuid(owner)];
    params.extend(columns.values().cloned());

    SqlStatement {
        query: format!(
            "UPDATE {} SET {} WHERE \"id\" = $1 AND {} = $2 RETURNING *",
            quote_identifier(table),
            assignments.join(", "),
            quote_identifier(owner_column)
        ),
        params,
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlValue::Text(s) => q.bind(s.as_deref()),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Uuid(id) => q.bind(*id),
    }
}
