//! Development seed data
//!
//! Bootstraps a super admin account plus a couple of published events
//! with sponsorship packages, so a fresh instance is usable immediately.
//! Seeding is skipped when the collections already hold data.

use chrono::Utc;

use sponsorhub_shared::models::{Event, Role, SponsorshipPackage, UserProfile};

use crate::auth::hash_password;
use crate::core::ServerState;
use crate::store::collections;
use crate::utils::{AppError, AppResult};

const DEFAULT_ADMIN_EMAIL: &str = "admin@sponsorhub.local";
const DEFAULT_ADMIN_PASSWORD: &str = "changeme-admin";

/// Create the bootstrap super admin unless any account exists.
pub async fn ensure_bootstrap_admin(state: &ServerState) -> AppResult<()> {
    if !state.store().list(collections::USERS).await?.is_empty() {
        return Ok(());
    }

    let email =
        std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

    let now = Utc::now();
    let admin = UserProfile {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.clone(),
        first_name: "Platform".to_string(),
        last_name: "Admin".to_string(),
        company: None,
        contact_number: None,
        user_type: Role::SuperAdmin,
        permissions: vec![],
        password_hash: Some(
            hash_password(&password)
                .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?,
        ),
        is_active: true,
        is_verified: true,
        created_at: now,
        updated_at: now,
    };

    state
        .store()
        .set(
            collections::USERS,
            &admin.id,
            serde_json::to_value(&admin).map_err(|e| AppError::internal(e.to_string()))?,
        )
        .await?;

    tracing::info!(email = %email, "Bootstrap super admin created");
    Ok(())
}

/// Seed demo events and packages in development environments.
pub async fn seed_demo_data(state: &ServerState) -> AppResult<()> {
    if !state.store().list(collections::EVENTS).await?.is_empty() {
        return Ok(());
    }

    let now = Utc::now();
    let events = [
        Event {
            id: "evt-tech-expo".to_string(),
            organizer_id: "org-demo".to_string(),
            title: "Tech Expo 2026".to_string(),
            description: Some("Annual technology showcase".to_string()),
            venue: Some("Harbor Convention Center".to_string()),
            starts_at: None,
            ends_at: None,
            is_published: true,
            created_at: now,
            updated_at: now,
        },
        Event {
            id: "evt-food-fest".to_string(),
            organizer_id: "org-demo".to_string(),
            title: "Street Food Festival".to_string(),
            description: None,
            venue: Some("Riverside Park".to_string()),
            starts_at: None,
            ends_at: None,
            is_published: true,
            created_at: now,
            updated_at: now,
        },
    ];
    let packages = [
        SponsorshipPackage {
            id: "pkg-tech-gold".to_string(),
            event_id: "evt-tech-expo".to_string(),
            name: "Gold".to_string(),
            description: Some("Main stage branding".to_string()),
            price: Some(10000.0),
            benefits: vec![
                "logo on main stage".to_string(),
                "keynote mention".to_string(),
            ],
            created_at: now,
            updated_at: now,
        },
        SponsorshipPackage {
            id: "pkg-tech-silver".to_string(),
            event_id: "evt-tech-expo".to_string(),
            name: "Silver".to_string(),
            description: None,
            price: Some(4000.0),
            benefits: vec!["booth space".to_string()],
            created_at: now,
            updated_at: now,
        },
        SponsorshipPackage {
            id: "pkg-food-partner".to_string(),
            event_id: "evt-food-fest".to_string(),
            name: "Festival Partner".to_string(),
            description: None,
            price: Some(2500.0),
            benefits: vec!["banner placement".to_string()],
            created_at: now,
            updated_at: now,
        },
    ];

    for event in &events {
        state
            .store()
            .set(
                collections::EVENTS,
                &event.id,
                serde_json::to_value(event).map_err(|e| AppError::internal(e.to_string()))?,
            )
            .await?;
    }
    for package in &packages {
        state
            .store()
            .set(
                collections::PACKAGES,
                &package.id,
                serde_json::to_value(package).map_err(|e| AppError::internal(e.to_string()))?,
            )
            .await?;
    }

    tracing::info!(
        events = events.len(),
        packages = packages.len(),
        "Demo data seeded"
    );
    Ok(())
}
