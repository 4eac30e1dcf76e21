//! 演示数据初始化：用户、分类、球队、赛事、促销。
//! 可重复执行，已有数据的段落会跳过。

use bettitan_backend::config::Config;
use bettitan_backend::database::{DbPool, create_pool, run_migrations};
use bettitan_backend::entities::{
    EventStatus, event_entity as events, promotion_entity as promotions,
    sport_category_entity as sport_categories, team_entity as teams, user_entity as users,
    user_stat_entity as user_stats,
};
use bettitan_backend::utils::hash_password;
use chrono::{Duration, Utc};
use env_logger::Env;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use std::collections::HashMap;

const TEAM_LOGO: &str = "https://images.unsplash.com/photo-1589487391730-58f20eb2c308?crop=entropy&cs=tinysrgb&fit=crop&fm=jpg&h=40&w=40";

async fn ensure_user(
    pool: &DbPool,
    username: &str,
    password: &str,
    is_admin: bool,
    balance: Decimal,
    total_won: Decimal,
    total_lost: Decimal,
) -> anyhow::Result<()> {
    let existing = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(pool)
        .await?;
    if existing.is_some() {
        log::info!("User {} already exists, skipping", username);
        return Ok(());
    }

    let user = users::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password)?),
        is_admin: Set(is_admin),
        balance: Set(balance),
        ..Default::default()
    }
    .insert(pool)
    .await?;

    user_stats::ActiveModel {
        user_id: Set(user.id),
        pending_bets: Set(0),
        total_won: Set(total_won),
        total_lost: Set(total_lost),
        ..Default::default()
    }
    .insert(pool)
    .await?;

    log::info!("Created user {} (id={})", user.username, user.id);
    Ok(())
}

/// 建分类并返回 slug -> id 映射
async fn seed_categories(pool: &DbPool) -> anyhow::Result<HashMap<String, i64>> {
    let count = sport_categories::Entity::find().count(pool).await?;
    if count == 0 {
        let rows = [
            ("Fútbol", "football", "ri-football-line"),
            ("Baloncesto", "basketball", "ri-basketball-line"),
            ("Tenis", "tennis", "ri-tennis-line"),
            ("Fútbol Americano", "american-football", "ri-football-fill"),
            ("Béisbol", "baseball", "ri-gamepad-line"),
            ("eSports", "esports", "ri-gamepad-line"),
        ];
        for (name, slug, icon) in rows {
            sport_categories::ActiveModel {
                name: Set(name.to_string()),
                slug: Set(slug.to_string()),
                icon: Set(Some(icon.to_string())),
                ..Default::default()
            }
            .insert(pool)
            .await?;
        }
        log::info!("Created sport categories");
    } else {
        log::info!("Sport categories already exist, skipping");
    }

    let all = sport_categories::Entity::find().all(pool).await?;
    Ok(all.into_iter().map(|c| (c.slug, c.id)).collect())
}

async fn seed_teams(pool: &DbPool, categories: &HashMap<String, i64>) -> anyhow::Result<()> {
    let count = teams::Entity::find().count(pool).await?;
    if count > 0 {
        log::info!("Teams already exist, skipping");
        return Ok(());
    }

    let rows = [
        ("Barcelona", "football"),
        ("Real Madrid", "football"),
        ("Atlético Madrid", "football"),
        ("Sevilla", "football"),
        ("Liverpool", "football"),
        ("Man City", "football"),
        ("Chelsea", "football"),
        ("Arsenal", "football"),
        ("Juventus", "football"),
        ("AC Milan", "football"),
        ("Lakers", "basketball"),
        ("Celtics", "basketball"),
        ("Warriors", "basketball"),
        ("Bulls", "basketball"),
        // 网球选手也按球队建模
        ("Nadal", "tennis"),
        ("Djokovic", "tennis"),
        ("Federer", "tennis"),
        ("Alcaraz", "tennis"),
    ];
    for (name, category_slug) in rows {
        let category_id = categories
            .get(category_slug)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Missing category {}", category_slug))?;
        teams::ActiveModel {
            name: Set(name.to_string()),
            logo: Set(Some(TEAM_LOGO.to_string())),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(pool)
        .await?;
    }

    log::info!("Created teams");
    Ok(())
}

struct EventSeed {
    league: &'static str,
    category: &'static str,
    home: &'static str,
    away: &'static str,
    /// 距现在的开球偏移（分钟），负数表示已开球
    start_offset_minutes: i64,
    /// 滚球时为 (主队比分, 客队比分, 比赛进行分钟)
    live: Option<(i32, i32, i32)>,
    home_odds: Decimal,
    draw_odds: Decimal,
    away_odds: Decimal,
}

async fn seed_events(pool: &DbPool, categories: &HashMap<String, i64>) -> anyhow::Result<()> {
    let count = events::Entity::find().count(pool).await?;
    if count > 0 {
        log::info!("Events already exist, skipping");
        return Ok(());
    }

    let team_ids: HashMap<String, i64> = teams::Entity::find()
        .all(pool)
        .await?
        .into_iter()
        .map(|t| (t.name, t.id))
        .collect();

    let rows = [
        EventSeed {
            league: "La Liga",
            category: "football",
            home: "Barcelona",
            away: "Real Madrid",
            start_offset_minutes: -60,
            live: Some((2, 1, 65)),
            home_odds: Decimal::new(210, 2),
            draw_odds: Decimal::new(325, 2),
            away_odds: Decimal::new(450, 2),
        },
        EventSeed {
            league: "Premier League",
            category: "football",
            home: "Liverpool",
            away: "Man City",
            start_offset_minutes: -40,
            live: Some((0, 0, 42)),
            home_odds: Decimal::new(340, 2),
            draw_odds: Decimal::new(290, 2),
            away_odds: Decimal::new(220, 2),
        },
        EventSeed {
            league: "Serie A",
            category: "football",
            home: "Juventus",
            away: "AC Milan",
            start_offset_minutes: -75,
            live: Some((3, 1, 78)),
            home_odds: Decimal::new(105, 2),
            draw_odds: Decimal::new(1000, 2),
            away_odds: Decimal::new(2500, 2),
        },
        EventSeed {
            league: "La Liga",
            category: "football",
            home: "Atlético Madrid",
            away: "Sevilla",
            start_offset_minutes: 4 * 60,
            live: None,
            home_odds: Decimal::new(190, 2),
            draw_odds: Decimal::new(340, 2),
            away_odds: Decimal::new(420, 2),
        },
        EventSeed {
            league: "Premier League",
            category: "football",
            home: "Arsenal",
            away: "Chelsea",
            start_offset_minutes: 5 * 60,
            live: None,
            home_odds: Decimal::new(210, 2),
            draw_odds: Decimal::new(330, 2),
            away_odds: Decimal::new(350, 2),
        },
        EventSeed {
            league: "NBA",
            category: "basketball",
            home: "Lakers",
            away: "Celtics",
            start_offset_minutes: 2 * 60,
            live: None,
            home_odds: Decimal::new(180, 2),
            draw_odds: Decimal::new(1500, 2),
            away_odds: Decimal::new(210, 2),
        },
        EventSeed {
            league: "Wimbledon",
            category: "tennis",
            home: "Nadal",
            away: "Djokovic",
            start_offset_minutes: 24 * 60,
            live: None,
            home_odds: Decimal::new(220, 2),
            draw_odds: Decimal::new(5000, 2),
            away_odds: Decimal::new(175, 2),
        },
    ];

    let now = Utc::now();
    for row in rows {
        let category_id = categories
            .get(row.category)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Missing category {}", row.category))?;
        let home_team_id = team_ids
            .get(row.home)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Missing team {}", row.home))?;
        let away_team_id = team_ids
            .get(row.away)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Missing team {}", row.away))?;

        let (status, home_score, away_score, minute) = match row.live {
            Some((home_score, away_score, minute)) => (
                EventStatus::Live,
                Some(home_score),
                Some(away_score),
                Some(minute),
            ),
            None => (EventStatus::Upcoming, None, None, None),
        };

        events::ActiveModel {
            league: Set(row.league.to_string()),
            category_id: Set(category_id),
            home_team_id: Set(home_team_id),
            away_team_id: Set(away_team_id),
            start_time: Set(now + Duration::minutes(row.start_offset_minutes)),
            status: Set(status),
            home_score: Set(home_score),
            away_score: Set(away_score),
            minute: Set(minute),
            home_odds: Set(row.home_odds),
            draw_odds: Set(Some(row.draw_odds)),
            away_odds: Set(row.away_odds),
            ..Default::default()
        }
        .insert(pool)
        .await?;
    }

    log::info!("Created events");
    Ok(())
}

async fn seed_promotions(pool: &DbPool) -> anyhow::Result<()> {
    let count = promotions::Entity::find().count(pool).await?;
    if count > 0 {
        log::info!("Promotions already exist, skipping");
        return Ok(());
    }

    let now = Utc::now();
    let rows = [
        (
            "Bono de Bienvenida 100%",
            "Hasta 200€ en tu primer depósito",
            "https://images.unsplash.com/photo-1579621970588-a35d0e7ab9b6?auto=format&fit=crop&w=800&h=450&q=80",
            "new_users",
            None,
            now + Duration::days(90),
            "Oferta válida para nuevos usuarios. El depósito mínimo es de 10€. Se aplican requisitos de apuesta de 5x el bono antes de poder retirar ganancias.",
        ),
        (
            "Super Cuotas Liga",
            "Mejores cuotas en partidos de La Liga",
            "https://images.unsplash.com/photo-1518091043644-c1d4457512c6?auto=format&fit=crop&w=800&h=450&q=80",
            "sports",
            Some("LALIGA10"),
            now + Duration::days(30),
            "Aplica a partidos seleccionados de La Liga. Las cuotas mejoradas se mostrarán automáticamente en la sección de apuestas.",
        ),
        (
            "Casino en Vivo",
            "Giros gratis cada viernes",
            "https://images.unsplash.com/photo-1606167668584-78701c57f13d?auto=format&fit=crop&w=800&h=450&q=80",
            "casino",
            None,
            now + Duration::days(60),
            "10 giros gratis cada viernes en slots seleccionadas. Requiere depósito mínimo de 20€ durante la semana. Las ganancias tienen un requisito de apuesta de 25x.",
        ),
    ];

    for (title, description, image_url, category, code, end_date, terms) in rows {
        promotions::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            image_url: Set(image_url.to_string()),
            category: Set(category.to_string()),
            code: Set(code.map(str::to_string)),
            end_date: Set(end_date),
            terms: Set(terms.to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(pool)
        .await?;
    }

    log::info!("Created promotions");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_toml().expect("Failed to load configuration file");
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    log::info!("Starting database seeding");

    // 管理员账号可通过配置覆盖
    let admin_username = config
        .seed
        .admin_username
        .as_deref()
        .unwrap_or("admin")
        .to_string();
    let admin_password = config
        .seed
        .admin_password
        .as_deref()
        .unwrap_or("admin123")
        .to_string();

    ensure_user(
        &pool,
        &admin_username,
        &admin_password,
        true,
        Decimal::from(10_000),
        Decimal::ZERO,
        Decimal::ZERO,
    )
    .await?;
    ensure_user(
        &pool,
        "demo",
        "demo123",
        false,
        Decimal::from(1_000),
        Decimal::from(150),
        Decimal::from(75),
    )
    .await?;

    let categories = seed_categories(&pool).await?;
    seed_teams(&pool, &categories).await?;
    seed_events(&pool, &categories).await?;
    seed_promotions(&pool).await?;

    log::info!("Database seeding completed");
    Ok(())
}
