//! Development data seeding command.
//!
//! Creates one partner account with a handful of approved artworks, plus
//! the public site settings the storefront home page reads. Intended for
//! local development only; every seeded account uses the password
//! `dev-password-only`.

use rust_decimal::Decimal;
use serde_json::json;

use maru_admin::db::artworks::ArtworkRepository;
use maru_admin::db::settings::SettingsRepository;
use maru_admin::db::users::UserRepository;
use maru_admin::models::artwork::ArtworkInput;
use maru_admin::services::auth::hash_password;
use maru_core::{ApprovalStatus, Category, Email, Season, SpaceTag, UserRole};

use super::{CommandError, connect};

struct SeedArtwork {
    title: &'static str,
    description: &'static str,
    price: i64,
    rental_price: Option<i64>,
    category: Category,
    season: Option<Season>,
    space: Option<SpaceTag>,
    width_cm: i64,
    height_cm: i64,
}

const SEED_ARTWORKS: &[SeedArtwork] = &[
    SeedArtwork {
        title: "겨울빛",
        description: "Winter light over a hanok courtyard. Oil on canvas.",
        price: 1_200_000,
        rental_price: Some(90_000),
        category: Category::Painting,
        season: Some(Season::Winter),
        space: Some(SpaceTag::LivingRoom),
        width_cm: 65,
        height_cm: 53,
    },
    SeedArtwork {
        title: "아침 안개",
        description: "Morning fog on the Bukhansan ridge. Archival pigment print.",
        price: 450_000,
        rental_price: Some(40_000),
        category: Category::Photography,
        season: Some(Season::Autumn),
        space: Some(SpaceTag::Office),
        width_cm: 90,
        height_cm: 60,
    },
    SeedArtwork {
        title: "파도 연작 III",
        description: "Third piece of the wave series. Ceramic relief.",
        price: 2_800_000,
        rental_price: None,
        category: Category::Craft,
        season: Some(Season::Summer),
        space: Some(SpaceTag::Lobby),
        width_cm: 40,
        height_cm: 40,
    },
    SeedArtwork {
        title: "고요",
        description: "Stillness. Woodblock print, edition of 20.",
        price: 380_000,
        rental_price: Some(35_000),
        category: Category::Print,
        season: Some(Season::Spring),
        space: Some(SpaceTag::Bedroom),
        width_cm: 50,
        height_cm: 70,
    },
];

/// Seed the database with development data.
///
/// # Errors
///
/// Returns an error if any write fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let users = UserRepository::new(&pool);
    let artworks = ArtworkRepository::new(&pool);
    let settings = SettingsRepository::new(&pool);

    let password_hash =
        hash_password("dev-password-only").map_err(|e| CommandError::Invalid(e.to_string()))?;

    let email =
        Email::parse("yujin@marugallery.kr").map_err(|e| CommandError::Invalid(e.to_string()))?;
    let partner = users
        .create(&email, &password_hash, "한유진", UserRole::Partner)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;
    users
        .set_approval(partner.id, ApprovalStatus::Approved)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;
    users
        .set_spotlight(partner.id)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    for seed in SEED_ARTWORKS {
        let input = ArtworkInput {
            owner_id: partner.id,
            title: seed.title.to_owned(),
            artist_name: partner.name.clone(),
            description: seed.description.to_owned(),
            images: Vec::new(),
            price: Decimal::from(seed.price),
            rental_price: seed.rental_price.map(Decimal::from),
            category: seed.category,
            season: seed.season,
            space: seed.space,
            width_cm: Decimal::from(seed.width_cm),
            height_cm: Decimal::from(seed.height_cm),
        };

        let artwork = artworks
            .create(&input)
            .await
            .map_err(|e| CommandError::Invalid(e.to_string()))?;
        artworks
            .set_status(artwork.id, ApprovalStatus::Approved)
            .await
            .map_err(|e| CommandError::Invalid(e.to_string()))?;
        tracing::info!(artwork_id = %artwork.id, title = %artwork.title, "seeded artwork");
    }

    settings
        .set(
            "site.hero",
            &json!({
                "headline": "계절의 빛을 담은 작품들",
                "subcopy": "마루 갤러리의 이번 시즌 컬렉션을 만나보세요.",
            }),
        )
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;
    settings
        .set(
            "site.contact",
            &json!({
                "address": "서울특별시 종로구 북촌로 11길 4",
                "phone": "02-1234-5678",
                "hours": "화-일 10:00-18:00",
            }),
        )
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    tracing::info!("Seed complete: 1 partner, {} artworks", SEED_ARTWORKS.len());
    Ok(())
}
