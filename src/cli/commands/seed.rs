//! Demo catalog generator.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::Config;
use crate::domain;
use crate::models::catalog::{
    CategoryInput, ContentRatingInput, EpisodeInput, LanguageInput, LinkKind, PersonInput,
    PersonKind, SeasonInput, SeriesInput, TagInput,
};
use crate::state::SharedState;

const CATEGORIES: &[&str] = &["Romance", "Thriller", "Comedy", "Historical", "Fantasy", "Medical"];
const TAGS: &[&str] = &["revenge", "slow-burn", "time-travel", "office", "chaebol", "mystery"];
const LANGUAGES: &[(&str, &str)] = &[("Korean", "ko"), ("Mandarin", "zh"), ("English", "en")];
const RATINGS: &[(&str, &str)] = &[
    ("G", "General audiences"),
    ("PG-13", "Parents strongly cautioned"),
    ("TV-14", "Parents strongly cautioned"),
    ("TV-MA", "Mature audiences only"),
];
const ADJECTIVES: &[&str] = &[
    "Crimson", "Silent", "Hidden", "Eternal", "Broken", "Golden", "Midnight", "Scarlet",
];
const NOUNS: &[&str] = &[
    "Palace", "Promise", "Garden", "Moon", "Contract", "Heir", "Letter", "Tide",
];
const FIRST_NAMES: &[&str] = &["Min-jun", "Seo-yeon", "Wei", "Hana", "Ji-ho", "Lin", "Yuna"];
const LAST_NAMES: &[&str] = &["Kim", "Park", "Chen", "Lee", "Zhao", "Choi"];

/// One generated series and the indexes of the lookups it links to.
struct SeriesPlan {
    input: SeriesInput,
    categories: Vec<usize>,
    tags: Vec<usize>,
    languages: Vec<usize>,
    cast: Vec<usize>,
    seasons: Vec<(SeasonInput, Vec<EpisodeInput>)>,
}

struct Lookups {
    categories: Vec<i32>,
    tags: Vec<i32>,
    languages: Vec<i32>,
    ratings: Vec<i32>,
    actors: Vec<i32>,
    directors: Vec<i32>,
}

pub async fn cmd_seed(config: Config, series_count: u32) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let lookups = ensure_lookups(&state).await?;

    let plans = plan_series(series_count, &lookups, domain::today());

    let mut episodes = 0;
    for plan in plans {
        let series = state.content_service.create_series(plan.input).await?;

        let links = [
            (LinkKind::Categories, pick(&lookups.categories, &plan.categories)),
            (LinkKind::Tags, pick(&lookups.tags, &plan.tags)),
            (LinkKind::Languages, pick(&lookups.languages, &plan.languages)),
            (LinkKind::Cast, pick(&lookups.actors, &plan.cast)),
        ];
        for (kind, ids) in links {
            state
                .content_service
                .replace_links(&series.slug, kind, ids)
                .await?;
        }

        for (season, season_episodes) in plan.seasons {
            let season = state
                .content_service
                .create_season(&series.slug, season)
                .await?;
            for episode in season_episodes {
                state
                    .content_service
                    .create_episode(season.id, episode)
                    .await?;
                episodes += 1;
            }
        }

        println!("  + {} ({})", series.title, series.slug);
    }

    println!("✓ Seeded {series_count} dramas with {episodes} episodes");
    Ok(())
}

fn pick(ids: &[i32], indexes: &[usize]) -> Vec<i32> {
    indexes.iter().filter_map(|i| ids.get(*i).copied()).collect()
}

/// Reuses reference rows that already exist by name so seeding can be repeated.
async fn ensure_lookups(state: &SharedState) -> anyhow::Result<Lookups> {
    let catalog = &state.catalog_service;
    let lookup = &state.lookup_service;

    let existing = catalog.categories().await?;
    let mut categories = Vec::new();
    for name in CATEGORIES {
        let id = match existing.iter().find(|c| c.name == *name) {
            Some(found) => found.id,
            None => {
                lookup
                    .create_category(CategoryInput {
                        name: (*name).to_string(),
                        slug: None,
                        thumbnail: None,
                        description: Some(format!("{name} dramas")),
                    })
                    .await?
                    .id
            }
        };
        categories.push(id);
    }

    let existing = catalog.tags().await?;
    let mut tags = Vec::new();
    for name in TAGS {
        let id = match existing.iter().find(|t| t.name == *name) {
            Some(found) => found.id,
            None => {
                lookup
                    .create_tag(TagInput {
                        name: (*name).to_string(),
                        slug: None,
                    })
                    .await?
                    .id
            }
        };
        tags.push(id);
    }

    let existing = catalog.languages().await?;
    let mut languages = Vec::new();
    for (name, code) in LANGUAGES {
        let id = match existing.iter().find(|l| l.code == *code) {
            Some(found) => found.id,
            None => {
                lookup
                    .create_language(LanguageInput {
                        name: (*name).to_string(),
                        code: (*code).to_string(),
                    })
                    .await?
                    .id
            }
        };
        languages.push(id);
    }

    let existing = catalog.content_ratings().await?;
    let mut ratings = Vec::new();
    for (code, description) in RATINGS {
        let id = match existing.iter().find(|r| r.code == *code) {
            Some(found) => found.id,
            None => {
                lookup
                    .create_content_rating(ContentRatingInput {
                        code: (*code).to_string(),
                        description: Some((*description).to_string()),
                    })
                    .await?
                    .id
            }
        };
        ratings.push(id);
    }

    let (actor_inputs, director_inputs) = {
        let mut rng = rand::rng();
        (
            (0..12).map(|_| random_person(&mut rng)).collect::<Vec<_>>(),
            (0..4).map(|_| random_person(&mut rng)).collect::<Vec<_>>(),
        )
    };

    let mut actors = Vec::new();
    for input in actor_inputs {
        actors.push(lookup.create_person(PersonKind::Actor, input).await?.id);
    }
    let mut directors = Vec::new();
    for input in director_inputs {
        directors.push(lookup.create_person(PersonKind::Director, input).await?.id);
    }

    Ok(Lookups {
        categories,
        tags,
        languages,
        ratings,
        actors,
        directors,
    })
}

fn random_person(rng: &mut impl Rng) -> PersonInput {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Min-jun");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Kim");
    let born = NaiveDate::from_ymd_opt(rng.random_range(1960..2002), rng.random_range(1..=12), 1);

    PersonInput {
        name: format!("{last} {first}"),
        profile_image: None,
        biography: None,
        date_of_birth: born,
    }
}

fn random_indexes(rng: &mut impl Rng, len: usize, max: usize) -> Vec<usize> {
    let count = rng.random_range(1..=max.min(len).max(1));
    let all: Vec<usize> = (0..len).collect();
    all.choose_multiple(rng, count).copied().collect()
}

/// Built up front so the thread-local RNG is never held across an await.
fn plan_series(count: u32, lookups: &Lookups, today: NaiveDate) -> Vec<SeriesPlan> {
    let mut rng = rand::rng();

    (0..count)
        .map(|_| {
            let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Silent");
            let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Palace");
            let title = format!("The {adjective} {noun}");

            // A few upcoming releases, the rest spread over the last three years
            let offset = if rng.random_bool(0.15) {
                rng.random_range(1..90)
            } else {
                -rng.random_range(0..1095)
            };
            let release_date = today + Duration::days(offset);

            let is_featured = rng.random_bool(0.25);
            let featured_until = is_featured.then(|| today + Duration::days(rng.random_range(-5..30)));

            let rating = f64::from(rng.random_range(50..=99_u8)) / 10.0;

            let seasons = (1..=rng.random_range(1..=2))
                .map(|season_number| {
                    let episodes = (1..=rng.random_range(3..=8))
                        .map(|episode_number| {
                            let minutes = rng.random_range(40..75);
                            EpisodeInput {
                                episode_number,
                                title: format!("Episode {episode_number}"),
                                description: None,
                                release_date: Some(
                                    release_date + Duration::weeks(i64::from(episode_number - 1)),
                                ),
                                duration: Some(format!("00:{minutes:02}:00")),
                                video_file: Some(format!(
                                    "https://cdn.example.com/videos/{noun}-{season_number}-{episode_number}.mp4"
                                ).to_lowercase()),
                                video_file_name: None,
                                is_free: episode_number <= 2,
                                is_active: true,
                            }
                        })
                        .collect();
                    (
                        SeasonInput {
                            season_number,
                            release_date: Some(release_date),
                            description: None,
                        },
                        episodes,
                    )
                })
                .collect();

            SeriesPlan {
                input: SeriesInput {
                    title,
                    description: format!("A drama about a {} {}.", adjective.to_lowercase(), noun.to_lowercase()),
                    release_date: Some(release_date),
                    director_id: lookups.directors.choose(&mut rng).copied(),
                    content_rating_id: lookups.ratings.choose(&mut rng).copied(),
                    rating,
                    poster_image: None,
                    trailer_url: None,
                    slug: None,
                    is_featured,
                    featured_until,
                    trending_threshold: None,
                },
                categories: random_indexes(&mut rng, lookups.categories.len(), 2),
                tags: random_indexes(&mut rng, lookups.tags.len(), 3),
                languages: random_indexes(&mut rng, lookups.languages.len(), 2),
                cast: random_indexes(&mut rng, lookups.actors.len(), 4),
                seasons,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> Lookups {
        Lookups {
            categories: vec![1, 2, 3],
            tags: vec![4, 5],
            languages: vec![6],
            ratings: vec![7],
            actors: vec![8, 9, 10],
            directors: vec![11],
        }
    }

    #[test]
    fn test_plan_series_produces_valid_inputs() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let plans = plan_series(25, &lookups(), today);
        assert_eq!(plans.len(), 25);

        for plan in &plans {
            assert!(domain::validate_series_rating(plan.input.rating).is_ok());
            assert!(!plan.categories.is_empty() && plan.categories.len() <= 2);
            assert!(plan.languages.iter().all(|i| *i < 1));
            assert!(!plan.seasons.is_empty());
            for (_, episodes) in &plan.seasons {
                for episode in episodes {
                    let duration = episode.duration.as_deref().unwrap();
                    assert!(domain::parse_duration(duration).is_ok());
                }
            }
        }
    }

    #[test]
    fn test_pick_ignores_out_of_range() {
        assert_eq!(pick(&[10, 20, 30], &[0, 2, 7]), vec![10, 30]);
    }
}
