//! Business logic services

pub mod books;
pub mod sessions;
pub mod users;

use crate::repository::books::BookDao;
use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub users: users::UsersService,
    pub sessions: sessions::SessionService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, sessions: sessions::SessionService) -> Self {
        Self {
            books: books::BooksService::new(repository.clone(), BookDao::new()),
            users: users::UsersService::new(repository),
            sessions,
        }
    }
}
