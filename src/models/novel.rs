use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Id;
use super::taxonomy::{Genre, Tag};

/// Catalog entry as returned by list endpoints (search, trending, latest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelSummary {
    pub id: Id,
    #[serde(default)]
    pub title_uk: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub chapter_count: Option<i64>,
    #[serde(default)]
    pub release_year: Option<i32>,
}

impl NovelSummary {
    /// Ukrainian title first, English as fallback.
    pub fn title(&self) -> &str {
        pick_title(self.title_uk.as_deref(), self.title_en.as_deref())
    }
}

/// Full novel record from `GET /novels/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    pub id: Id,
    #[serde(default)]
    pub title_uk: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub alt_titles: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<NovelAuthor>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub age_rating: Option<String>,
    #[serde(default)]
    pub chapter_count: Option<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Novel {
    pub fn title(&self) -> &str {
        pick_title(self.title_uk.as_deref(), self.title_en.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelAuthor {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Ranking window for trending and popularity lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Catalog ordering accepted by `POST /novels/search`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum CatalogSort {
    #[default]
    Popularity,
    Rating,
    Views,
    Chapters,
    ReleaseDate,
    UpdateDate,
    AddedDate,
    #[serde(rename = "titleAZ")]
    TitleAz,
    TitleCyrillic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

/// Body of the catalog filter search. Unset bounds go out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelFilter {
    pub genre_ids: Vec<Id>,
    pub tag_ids: Vec<Id>,
    pub min_chapter_count: Option<i64>,
    pub max_chapter_count: Option<i64>,
    pub min_release_year: Option<i32>,
    pub max_release_year: Option<i32>,
    pub age_rating: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub name: Option<String>,
    pub sort: CatalogSort,
    pub order: SortOrder,
}

fn pick_title<'a>(uk: Option<&'a str>, en: Option<&'a str>) -> &'a str {
    uk.filter(|t| !t.is_empty())
        .or(en.filter(|t| !t.is_empty()))
        .unwrap_or("(untitled)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::both(Some("Відьмак"), Some("The Witcher"), "Відьмак")]
    #[case::en_only(None, Some("The Witcher"), "The Witcher")]
    #[case::empty_uk(Some(""), Some("The Witcher"), "The Witcher")]
    #[case::none(None, None, "(untitled)")]
    fn test_pick_title(
        #[case] uk: Option<&str>,
        #[case] en: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(pick_title(uk, en), expected);
    }

    #[test]
    fn deserialize_full_novel() {
        let novel: Novel = serde_json::from_value(json!({
            "id": 5,
            "titleUk": "Володар таємниць",
            "titleEn": "Lord of the Mysteries",
            "altTitles": ["诡秘之主"],
            "author": {"id": 2, "username": "translator"},
            "type": "WEB_NOVEL",
            "status": "ONGOING",
            "chapterCount": 1394,
            "genres": [{"id": 1, "name": "Фентезі"}],
            "tags": [{"id": 3, "name": "Магія"}],
            "bannerUrl": "ignored"
        }))
        .unwrap();

        assert_eq!(novel.title(), "Володар таємниць");
        assert_eq!(novel.kind.as_deref(), Some("WEB_NOVEL"));
        assert_eq!(novel.genres[0].name, "Фентезі");
        assert_eq!(novel.chapter_count, Some(1394));
    }

    #[test]
    fn default_filter_matches_an_untouched_catalog_page() {
        assert_eq!(
            serde_json::to_value(NovelFilter::default()).unwrap(),
            json!({
                "genreIds": [],
                "tagIds": [],
                "minChapterCount": null,
                "maxChapterCount": null,
                "minReleaseYear": null,
                "maxReleaseYear": null,
                "ageRating": null,
                "type": null,
                "status": null,
                "name": null,
                "sort": "popularity",
                "order": "desc"
            })
        );
    }

    #[rstest]
    #[case::title_az(CatalogSort::TitleAz, "\"titleAZ\"")]
    #[case::release(CatalogSort::ReleaseDate, "\"releaseDate\"")]
    #[case::cyrillic(CatalogSort::TitleCyrillic, "\"titleCyrillic\"")]
    fn test_catalog_sort_serialize(#[case] sort: CatalogSort, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&sort).unwrap(), expected);
    }

    #[rstest]
    #[case::day(Period::Day, "day")]
    #[case::week(Period::Week, "week")]
    #[case::month(Period::Month, "month")]
    fn test_period_as_str(#[case] period: Period, #[case] expected: &str) {
        assert_eq!(period.as_str(), expected);
    }
}
