//! Typed reads of home page content, with static fallback sections for an empty database.

pub mod fallback;

use crate::error::AppError;
use crate::locale::Locale;
use crate::sql::qualified_table;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct HeroSlide {
    pub id: Option<Uuid>,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub display_order: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Statistic {
    pub id: Option<Uuid>,
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Partner {
    pub id: Option<Uuid>,
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub display_order: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct QuickLink {
    pub id: Option<Uuid>,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct NewsSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub budget: Option<f64>,
    pub featured_order: Option<f64>,
}

/// Where a section's items came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Backend,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section<T> {
    pub source: ContentSource,
    pub items: Vec<T>,
}

impl<T> Section<T> {
    pub fn backend(items: Vec<T>) -> Self {
        Section {
            source: ContentSource::Backend,
            items,
        }
    }

    /// Backend rows when there are any, otherwise the fallback list.
    pub fn or_fallback(rows: Vec<T>, fallback: impl FnOnce() -> Vec<T>, section: &'static str) -> Self {
        if rows.is_empty() {
            tracing::warn!(section, "no rows in backend, serving fallback content");
            Section {
                source: ContentSource::Fallback,
                items: fallback(),
            }
        } else {
            Section::backend(rows)
        }
    }

    /// Like [`Section::or_fallback`], and a failed query is logged and served as fallback too.
    pub fn from_query(
        rows: Result<Vec<T>, sqlx::Error>,
        fallback: impl FnOnce() -> Vec<T>,
        section: &'static str,
    ) -> Self {
        match rows {
            Ok(rows) => Section::or_fallback(rows, fallback, section),
            Err(e) => {
                tracing::error!(section, error = %e, "section query failed, serving fallback content");
                Section {
                    source: ContentSource::Fallback,
                    items: fallback(),
                }
            }
        }
    }
}

/// Site settings as key → value, defaults filled in for keys the backend lacks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteSettings(pub BTreeMap<String, String>);

impl SiteSettings {
    pub fn with_defaults(rows: Vec<(String, String)>, locale: Locale) -> Self {
        let mut map: BTreeMap<String, String> = fallback::site_settings(locale)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        map.extend(rows);
        SiteSettings(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HomePage {
    pub locale: Locale,
    pub hero_slides: Section<HeroSlide>,
    pub statistics: Section<Statistic>,
    pub partners: Section<Partner>,
    pub quick_links: Section<QuickLink>,
    pub featured_news: Section<NewsSummary>,
    pub featured_projects: Section<ProjectSummary>,
}

/// Number of featured items on the home page.
pub const HOME_FEATURED_LIMIT: i64 = 3;

pub struct CmsService;

impl CmsService {
    pub async fn hero_slides(pool: &PgPool, schema: &str, locale: Locale) -> Section<HeroSlide> {
        let sql = format!(
            "SELECT id, title, subtitle, image_url, cta_label, cta_url, display_order FROM {} \
             WHERE is_active IS NOT FALSE ORDER BY display_order ASC NULLS LAST, created_at DESC",
            qualified_table(schema, "hero_slides")
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, HeroSlide>(&sql).fetch_all(pool).await;
        Section::from_query(rows, || fallback::hero_slides(locale), "hero_slides")
    }

    pub async fn statistics(pool: &PgPool, schema: &str, locale: Locale) -> Section<Statistic> {
        let sql = format!(
            "SELECT id, label, value, unit, icon, display_order FROM {} \
             WHERE is_active IS NOT FALSE ORDER BY display_order ASC NULLS LAST, created_at DESC",
            qualified_table(schema, "statistics")
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Statistic>(&sql).fetch_all(pool).await;
        Section::from_query(rows, || fallback::statistics(locale), "statistics")
    }

    pub async fn partners(pool: &PgPool, schema: &str) -> Section<Partner> {
        let sql = format!(
            "SELECT id, name, logo_url, website_url, display_order FROM {} \
             WHERE is_active IS NOT FALSE ORDER BY display_order ASC NULLS LAST, name ASC",
            qualified_table(schema, "partners")
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Partner>(&sql).fetch_all(pool).await;
        Section::from_query(rows, fallback::partners, "partners")
    }

    pub async fn quick_links(pool: &PgPool, schema: &str, locale: Locale) -> Section<QuickLink> {
        let sql = format!(
            "SELECT id, title, url, icon, description, display_order FROM {} \
             WHERE is_active IS NOT FALSE ORDER BY display_order ASC NULLS LAST, title ASC",
            qualified_table(schema, "quick_links")
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, QuickLink>(&sql).fetch_all(pool).await;
        Section::from_query(rows, || fallback::quick_links(locale), "quick_links")
    }

    /// Featured news, newest first. Empty is a valid answer.
    pub async fn featured_news(pool: &PgPool, schema: &str, limit: i64) -> Result<Section<NewsSummary>, AppError> {
        let sql = format!(
            "SELECT id, title, slug, excerpt, category, image_url, published_at FROM {} \
             WHERE is_featured = TRUE ORDER BY published_at DESC NULLS LAST, created_at DESC LIMIT $1",
            qualified_table(schema, "news")
        );
        tracing::debug!(sql = %sql, limit, "query");
        let rows = sqlx::query_as::<_, NewsSummary>(&sql).bind(limit).fetch_all(pool).await?;
        Ok(Section::backend(rows))
    }

    /// Featured projects by featured_order. Empty is a valid answer.
    pub async fn featured_projects(
        pool: &PgPool,
        schema: &str,
        limit: i64,
    ) -> Result<Section<ProjectSummary>, AppError> {
        let sql = format!(
            "SELECT id, title, slug, description, status, location, image_url, budget, featured_order FROM {} \
             WHERE is_featured = TRUE ORDER BY featured_order ASC NULLS LAST, created_at DESC LIMIT $1",
            qualified_table(schema, "projects")
        );
        tracing::debug!(sql = %sql, limit, "query");
        let rows = sqlx::query_as::<_, ProjectSummary>(&sql).bind(limit).fetch_all(pool).await?;
        Ok(Section::backend(rows))
    }

    pub async fn site_settings(pool: &PgPool, schema: &str, locale: Locale) -> Result<SiteSettings, AppError> {
        let sql = format!("SELECT key, value FROM {} ORDER BY key", qualified_table(schema, "site_settings"));
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, (String, String)>(&sql).fetch_all(pool).await?;
        Ok(SiteSettings::with_defaults(rows, locale))
    }

    /// Everything the home page shows, fetched one section after another.
    /// Blocks with fallback content never fail the page.
    pub async fn home_page(pool: &PgPool, schema: &str, locale: Locale) -> Result<HomePage, AppError> {
        Ok(HomePage {
            locale,
            hero_slides: Self::hero_slides(pool, schema, locale).await,
            statistics: Self::statistics(pool, schema, locale).await,
            partners: Self::partners(pool, schema).await,
            quick_links: Self::quick_links(pool, schema, locale).await,
            featured_news: Self::featured_news(pool, schema, HOME_FEATURED_LIMIT).await?,
            featured_projects: Self::featured_projects(pool, schema, HOME_FEATURED_LIMIT).await?,
        })
    }
}
