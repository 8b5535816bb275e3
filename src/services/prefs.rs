use anyhow::Result;
use rusqlite::Connection;
use sea_query::{ColumnDef, Expr, OnConflict, Query, SqliteQueryBuilder, Table};
use sea_query_rusqlite::RusqliteBinder;
use std::path::{Path, PathBuf};

use crate::data::{BookmarksTable, PrefsMeta, PREFS_VERSION};

const THEME_KEY: &str = "theme";
const VERSION_KEY: &str = "version";

pub fn get_prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("govtui").join("prefs.db"))
}

/// Local preference store: one key/value table (theme, schema version) and
/// a bookmarks table keyed by listing title.
pub struct PrefsStore {
    conn: Connection,
}

impl PrefsStore {
    pub fn open_default() -> Result<Self> {
        let path = get_prefs_path().ok_or_else(|| anyhow::anyhow!("No config dir"))?;
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let meta_sql = Table::create()
            .table(PrefsMeta::Table)
            .if_not_exists()
            .col(ColumnDef::new(PrefsMeta::Key).text().not_null().primary_key())
            .col(ColumnDef::new(PrefsMeta::Value).text())
            .build(SqliteQueryBuilder);
        self.conn.execute(&meta_sql, [])?;

        // On a schema bump, drop the bookmarks table and reset the version
        let current_version = self
            .get_meta(VERSION_KEY)?
            .and_then(|v| v.parse::<i32>().ok());
        if current_version != Some(PREFS_VERSION) {
            let drop_sql = Table::drop()
                .table(BookmarksTable::Table)
                .if_exists()
                .build(SqliteQueryBuilder);
            let _ = self.conn.execute(&drop_sql, []);
            self.set_meta(VERSION_KEY, &PREFS_VERSION.to_string())?;
        }

        let bookmarks_sql = Table::create()
            .table(BookmarksTable::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(BookmarksTable::Title)
                    .text()
                    .not_null()
                    .primary_key(),
            )
            .build(SqliteQueryBuilder);
        self.conn.execute(&bookmarks_sql, [])?;

        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let (sql, values) = Query::select()
            .column(PrefsMeta::Value)
            .from(PrefsMeta::Table)
            .and_where(Expr::col(PrefsMeta::Key).eq(key))
            .build_rusqlite(SqliteQueryBuilder);

        let value = self
            .conn
            .query_row(&sql, &*values.as_params(), |row| row.get(0))
            .ok();
        Ok(value)
    }

    fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        let (sql, values) = Query::insert()
            .into_table(PrefsMeta::Table)
            .columns([PrefsMeta::Key, PrefsMeta::Value])
            .values_panic([key.into(), value.into()])
            .on_conflict(
                OnConflict::column(PrefsMeta::Key)
                    .update_column(PrefsMeta::Value)
                    .to_owned(),
            )
            .build_rusqlite(SqliteQueryBuilder);
        self.conn.execute(&sql, &*values.as_params())?;
        Ok(())
    }

    pub fn theme(&self) -> Result<Option<String>> {
        self.get_meta(THEME_KEY)
    }

    pub fn set_theme(&self, name: &str) -> Result<()> {
        self.set_meta(THEME_KEY, name)
    }

    pub fn bookmarks(&self) -> Result<Vec<String>> {
        let (sql, values) = Query::select()
            .column(BookmarksTable::Title)
            .from(BookmarksTable::Table)
            .order_by(BookmarksTable::Title, sea_query::Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = self.conn.prepare(&sql)?;
        let titles = stmt
            .query_map(&*values.as_params(), |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(titles)
    }

    pub fn add_bookmark(&self, title: &str) -> Result<()> {
        let (sql, values) = Query::insert()
            .into_table(BookmarksTable::Table)
            .columns([BookmarksTable::Title])
            .values_panic([title.into()])
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .build_rusqlite(SqliteQueryBuilder);
        self.conn.execute(&sql, &*values.as_params())?;
        Ok(())
    }

    pub fn remove_bookmark(&self, title: &str) -> Result<()> {
        let (sql, values) = Query::delete()
            .from_table(BookmarksTable::Table)
            .and_where(Expr::col(BookmarksTable::Title).eq(title))
            .build_rusqlite(SqliteQueryBuilder);
        self.conn.execute(&sql, &*values.as_params())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn theme_round_trips() {
        let dir = tempdir().unwrap();
        let store = PrefsStore::open_at(&dir.path().join("prefs.db")).unwrap();

        assert_eq!(store.theme().unwrap(), None);
        store.set_theme("dark").unwrap();
        assert_eq!(store.theme().unwrap(), Some("dark".to_string()));
        store.set_theme("light").unwrap();
        assert_eq!(store.theme().unwrap(), Some("light".to_string()));
    }

    #[test]
    fn theme_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.db");
        {
            let store = PrefsStore::open_at(&path).unwrap();
            store.set_theme("dark").unwrap();
        }
        let store = PrefsStore::open_at(&path).unwrap();
        assert_eq!(store.theme().unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn bookmarks_add_remove() {
        let dir = tempdir().unwrap();
        let store = PrefsStore::open_at(&dir.path().join("prefs.db")).unwrap();

        store.add_bookmark("Apply for PAN Card").unwrap();
        store.add_bookmark("Apply for PAN Card").unwrap();
        assert_eq!(
            store.bookmarks().unwrap(),
            vec!["Apply for PAN Card".to_string()]
        );

        store.remove_bookmark("Apply for PAN Card").unwrap();
        assert!(store.bookmarks().unwrap().is_empty());
    }
}
