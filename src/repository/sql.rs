//! Statement catalog for the manual book data-access path.
//!
//! Every template is parameterized; values are always bound, never spliced.
//! Column lists stay explicit so a schema change cannot silently reshape the
//! mapped entity.

/// Insert a book, yielding the server-generated id.
pub const INSERT_BOOK: &str = "\
    INSERT INTO books (title) VALUES ($1) RETURNING id";

/// Find all books.
pub const FIND_ALL_BOOKS: &str = "\
    SELECT id, title, created_at, updated_at, version \
    FROM books";

/// Find book by id.
pub const FIND_BOOK_BY_ID: &str = "\
    SELECT id, title, created_at, updated_at, version \
    FROM books \
    WHERE id = $1";

/// Find book by title.
pub const FIND_BOOK_BY_TITLE: &str = "\
    SELECT id, title, created_at, updated_at, version \
    FROM books \
    WHERE title = $1";

/// Update book by id; the store refreshes `updated_at` and bumps `version`.
pub const UPDATE_BOOK_BY_ID: &str = "\
    UPDATE books \
    SET title = $1, updated_at = now(), version = version + 1 \
    WHERE id = $2";

/// Delete book by id.
pub const DELETE_BOOK_BY_ID: &str = "\
    DELETE FROM books \
    WHERE id = $1";

/// All books created between two instants.
pub const FIND_BOOKS_BETWEEN_DATES: &str = "\
    SELECT id, title, created_at, updated_at, version \
    FROM books \
    WHERE created_at BETWEEN $1 AND $2";

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK_COLUMNS: &str = "id, title, created_at, updated_at, version";

    #[test]
    fn selects_keep_explicit_column_lists() {
        for stmt in [
            FIND_ALL_BOOKS,
            FIND_BOOK_BY_ID,
            FIND_BOOK_BY_TITLE,
            FIND_BOOKS_BETWEEN_DATES,
        ] {
            assert!(stmt.contains(BOOK_COLUMNS), "missing column list: {stmt}");
            assert!(!stmt.contains('*'), "select-all is forbidden: {stmt}");
        }
    }

    #[test]
    fn update_bumps_version_and_timestamp() {
        assert!(UPDATE_BOOK_BY_ID.contains("version = version + 1"));
        assert!(UPDATE_BOOK_BY_ID.contains("updated_at = now()"));
    }
}
