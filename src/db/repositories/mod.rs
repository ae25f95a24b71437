pub mod engagement;
pub mod lookup;
pub mod people;
pub mod season;
pub mod series;
pub mod user;
pub mod wallet;

use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Select};

use crate::domain::PageRequest;

/// RFC 3339 UTC timestamp with fixed microsecond precision so stored values sort lexically.
#[must_use]
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// One page of rows plus the totals needed to render pagination links.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

pub async fn fetch_page<E>(
    conn: &DatabaseConnection,
    select: Select<E>,
    request: PageRequest,
) -> Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    let paginator = select.paginate(conn, request.page_size);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(request.page - 1).await?;

    Ok(Page {
        items,
        total: totals.number_of_items,
        page: request.page,
        page_size: request.page_size,
        total_pages: totals.number_of_pages,
    })
}
