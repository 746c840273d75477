//! In-memory driven ports backing the review API integration tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use book_reviews::domain::ports::{
    BookMetadataSource, BookMetadataSourceError, BookRepository, BookRepositoryError,
    ReviewRepository, ReviewRepositoryError, UserPersistenceError, UserRepository,
};
use book_reviews::domain::{
    Book, BookMetadata, Email, Isbn, ReviewDraft, ReviewStatistic, ReviewSummary, User, Username,
};
use chrono::{DateTime, Utc};

#[derive(Default)]
pub struct InMemoryBooks {
    books: Mutex<Vec<Book>>,
    saves: AtomicUsize,
}

impl InMemoryBooks {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Vec<Book> {
        self.books.lock().expect("books lock").clone()
    }
}

#[async_trait]
impl BookRepository for InMemoryBooks {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        Ok(self.snapshot().into_iter().find(|book| &book.isbn == isbn))
    }

    async fn save(&self, metadata: &BookMetadata) -> Result<Book, BookRepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut books = self.books.lock().expect("books lock");
        let id = i64::try_from(books.len()).expect("small catalogue") + 1;
        let book = Book::from_metadata(id, metadata.clone());
        books.push(book.clone());
        Ok(book)
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self.snapshot())
    }
}

struct StoredReview {
    id: i64,
    book: Book,
    user: String,
    draft: ReviewDraft,
}

impl StoredReview {
    fn summary(&self) -> ReviewSummary {
        ReviewSummary {
            review_id: self.id,
            review_title: self.draft.review.title().to_owned(),
            review_content: self.draft.review.content().to_owned(),
            rating: self.draft.review.rating().value(),
            book_isbn: self.book.isbn.clone(),
            book_title: self.book.title.clone(),
            book_thumbnail_url: self.book.thumbnail_url.clone(),
            submitted_by: self.user.clone(),
            submitted_at: self.draft.created_at,
        }
    }
}

/// Review store resolving book and user names from the sibling stores.
pub struct InMemoryReviews {
    catalogue: Vec<Book>,
    reviews: Mutex<Vec<StoredReview>>,
}

impl InMemoryReviews {
    pub fn new(catalogue: Vec<Book>) -> Self {
        Self {
            catalogue,
            reviews: Mutex::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.reviews.lock().expect("reviews lock").len()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviews {
    async fn save(&self, draft: &ReviewDraft) -> Result<i64, ReviewRepositoryError> {
        let book = self
            .catalogue
            .iter()
            .find(|book| book.id == draft.book_id)
            .cloned()
            .ok_or_else(|| ReviewRepositoryError::query("foreign key violation on book_id"))?;
        let mut reviews = self.reviews.lock().expect("reviews lock");
        let id = i64::try_from(reviews.len()).expect("few reviews") + 1;
        reviews.push(StoredReview {
            id,
            book,
            user: format!("user-{}", draft.user_id),
            draft: draft.clone(),
        });
        Ok(id)
    }

    async fn find_by_id(
        &self,
        isbn: &Isbn,
        review_id: i64,
    ) -> Result<Option<ReviewSummary>, ReviewRepositoryError> {
        Ok(self
            .reviews
            .lock()
            .expect("reviews lock")
            .iter()
            .find(|stored| stored.id == review_id && &stored.book.isbn == isbn)
            .map(StoredReview::summary))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ReviewSummary>, ReviewRepositoryError> {
        let reviews = self.reviews.lock().expect("reviews lock");
        Ok(reviews
            .iter()
            .rev()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(StoredReview::summary)
            .collect())
    }

    async fn list_top_rated(
        &self,
        limit: i64,
    ) -> Result<Vec<ReviewSummary>, ReviewRepositoryError> {
        let mut summaries = self.list_recent(i64::MAX).await?;
        summaries.sort_by(|a, b| b.rating.cmp(&a.rating));
        summaries.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(summaries)
    }

    async fn statistics(&self) -> Result<Vec<ReviewStatistic>, ReviewRepositoryError> {
        let reviews = self.reviews.lock().expect("reviews lock");
        Ok(self
            .catalogue
            .iter()
            .filter_map(|book| {
                let ratings: Vec<i32> = reviews
                    .iter()
                    .filter(|stored| stored.book.id == book.id)
                    .map(|stored| stored.draft.review.rating().value())
                    .collect();
                (!ratings.is_empty()).then(|| ReviewStatistic {
                    book_id: book.id,
                    isbn: book.isbn.clone(),
                    avg: f64::from(ratings.iter().sum::<i32>()) / ratings.len() as f64,
                    ratings: i64::try_from(ratings.len()).expect("few ratings"),
                })
            })
            .collect())
    }

    async fn delete(&self, isbn: &Isbn, review_id: i64) -> Result<bool, ReviewRepositoryError> {
        let mut reviews = self.reviews.lock().expect("reviews lock");
        let before = reviews.len();
        reviews.retain(|stored| !(stored.id == review_id && &stored.book.isbn == isbn));
        Ok(reviews.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_identity(
        &self,
        name: &Username,
        email: &Email,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("users lock")
            .iter()
            .find(|user| &user.name == name && &user.email == email)
            .cloned())
    }

    async fn create(
        &self,
        name: &Username,
        email: &Email,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        let user = User {
            id: i64::try_from(users.len()).expect("few users") + 1,
            name: name.clone(),
            email: email.clone(),
            created_at,
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Metadata source returning canned metadata and counting lookups.
#[derive(Default)]
pub struct CountingMetadataSource {
    calls: AtomicUsize,
}

impl CountingMetadataSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookMetadataSource for CountingMetadataSource {
    async fn fetch_metadata_for_book(
        &self,
        isbn: &Isbn,
    ) -> Result<BookMetadata, BookMetadataSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(BookMetadata {
            isbn: isbn.clone(),
            title: "Effective Java".to_owned(),
            author: "Joshua Bloch".to_owned(),
            description: "n.A".to_owned(),
            genre: "Java (Computer program language)".to_owned(),
            pages: 412,
            publisher: "Addison-Wesley".to_owned(),
            thumbnail_url: "n.A".to_owned(),
        })
    }
}
