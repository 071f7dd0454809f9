//! Demo catalog seeding, the stand-in for the original populate script.
//!
//! The in-memory store starts empty on every boot, so local environments
//! load a small sample catalog to have something to browse.

use chrono::NaiveDate;

use libris_store::{MemoryStore, RecordId, RecordStore, StoreError};

use crate::modules::authors::models::Author;
use crate::modules::bookinstances::models::{BookInstance, LoanStatus};
use crate::modules::books::models::Book;
use crate::modules::genres::models::Genre;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub async fn load_sample_catalog(store: &MemoryStore) -> Result<(), StoreError> {
    let fantasy = store
        .save(Genre {
            id: RecordId::nil(),
            name: "Fantasy".into(),
        })
        .await?;
    let science_fiction = store
        .save(Genre {
            id: RecordId::nil(),
            name: "Science Fiction".into(),
        })
        .await?;
    // Unreferenced on purpose, so the delete flow has something to remove.
    store
        .save(Genre {
            id: RecordId::nil(),
            name: "French Poetry".into(),
        })
        .await?;

    let rothfuss = store
        .save(Author {
            id: RecordId::nil(),
            first_name: "Patrick".into(),
            family_name: "Rothfuss".into(),
            date_of_birth: date(1973, 6, 6),
            date_of_death: None,
        })
        .await?;
    let bova = store
        .save(Author {
            id: RecordId::nil(),
            first_name: "Ben".into(),
            family_name: "Bova".into(),
            date_of_birth: date(1932, 11, 8),
            date_of_death: date(2020, 11, 29),
        })
        .await?;
    let asimov = store
        .save(Author {
            id: RecordId::nil(),
            first_name: "Isaac".into(),
            family_name: "Asimov".into(),
            date_of_birth: date(1920, 1, 2),
            date_of_death: date(1992, 4, 6),
        })
        .await?;

    let name_of_the_wind = store
        .save(Book {
            id: RecordId::nil(),
            title: "The Name of the Wind (The Kingkiller Chronicle, #1)".into(),
            summary: "I have stolen princesses back from sleeping barrow kings. I burned \
                      down the town of Trebon. I have spent the night with Felurian and \
                      left with both my sanity and my life."
                .into(),
            isbn: "9781473211896".into(),
            author: rothfuss.id,
            genre: vec![fantasy.id],
        })
        .await?;
    let wise_mans_fear = store
        .save(Book {
            id: RecordId::nil(),
            title: "The Wise Man's Fear (The Kingkiller Chronicle, #2)".into(),
            summary: "Picking up the tale of Kvothe Kingkiller once again, we follow him \
                      into exile, into political intrigue, courtship, adventure, love and \
                      magic."
                .into(),
            isbn: "9788401352836".into(),
            author: rothfuss.id,
            genre: vec![fantasy.id],
        })
        .await?;
    let apes_and_angels = store
        .save(Book {
            id: RecordId::nil(),
            title: "Apes and Angels".into(),
            summary: "Humankind headed out to the stars not for conquest, nor exploration, \
                      nor even for curiosity. Humans went to the stars in a desperate \
                      crusade to save intelligent life wherever they found it."
                .into(),
            isbn: "9780765379528".into(),
            author: bova.id,
            genre: vec![science_fiction.id],
        })
        .await?;
    store
        .save(Book {
            id: RecordId::nil(),
            title: "The Complete Robot".into(),
            summary: "A collection of all of Isaac Asimov's robot stories, from the early \
                      standalones to the tales of the positronic men that think for \
                      themselves."
                .into(),
            isbn: "9780586057247".into(),
            author: asimov.id,
            genre: vec![science_fiction.id],
        })
        .await?;

    for (book, imprint, status, due_back) in [
        (
            &name_of_the_wind,
            "London Gollancz, 2014.",
            LoanStatus::Available,
            None,
        ),
        (
            &name_of_the_wind,
            "Gollancz, 2011.",
            LoanStatus::Loaned,
            date(2026, 9, 1),
        ),
        (
            &wise_mans_fear,
            "Gollancz, 2011.",
            LoanStatus::Maintenance,
            None,
        ),
        (
            &apes_and_angels,
            "New York Tom Doherty Associates, 2016.",
            LoanStatus::Reserved,
            date(2026, 8, 20),
        ),
        (
            &apes_and_angels,
            "New York Tom Doherty Associates, 2016.",
            LoanStatus::Available,
            None,
        ),
    ] {
        store
            .save(BookInstance {
                id: RecordId::nil(),
                book: book.id,
                imprint: imprint.into(),
                status,
                due_back,
            })
            .await?;
    }

    tracing::info!(
        genres = store.count::<Genre>().await?,
        authors = store.count::<Author>().await?,
        books = store.count::<Book>().await?,
        bookinstances = store.count::<BookInstance>().await?,
        "sample catalog loaded"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_store::Filter;

    #[tokio::test]
    async fn sample_catalog_is_internally_consistent() {
        let store = MemoryStore::new();
        load_sample_catalog(&store).await.unwrap();

        let books = store.find_many::<Book>(Filter::all()).await.unwrap();
        assert_eq!(books.len(), 4);

        // Every book reference resolves.
        for book in &books {
            let author: Option<Author> = store.find_by_id(book.author).await.unwrap();
            assert!(author.is_some());
            for genre in &book.genre {
                let genre: Option<Genre> = store.find_by_id(*genre).await.unwrap();
                assert!(genre.is_some());
            }
        }
        let instances = store
            .find_many::<BookInstance>(Filter::all())
            .await
            .unwrap();
        assert_eq!(instances.len(), 5);
        for instance in &instances {
            let book: Option<Book> = store.find_by_id(instance.book).await.unwrap();
            assert!(book.is_some());
        }
    }
}
