use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    IsAdmin,
    Balance,
    CreatedAt,
    LastLogin,
}

#[derive(DeriveIden)]
enum UserStats {
    Table,
    Id,
    UserId,
    PendingBets,
    TotalWon,
    TotalLost,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SportCategories {
    Table,
    Id,
    Name,
    Slug,
    Icon,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    Logo,
    CategoryId,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    League,
    CategoryId,
    HomeTeamId,
    AwayTeamId,
    StartTime,
    Status,
    HomeScore,
    AwayScore,
    Minute,
    HomeOdds,
    DrawOdds,
    AwayOdds,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BetSlipItems {
    Table,
    Id,
    UserId,
    EventId,
    BetType,
    Odds,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Bets {
    Table,
    Id,
    UserId,
    EventId,
    BetType,
    Odds,
    Amount,
    Status,
    PlacedAt,
    SettledAt,
}

#[derive(DeriveIden)]
enum Promotions {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    Category,
    Code,
    EndDate,
    Terms,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Deposits {
    Table,
    Id,
    UserId,
    Amount,
    CardLast4,
    Reference,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ContactMessages {
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // enums
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("event_status"))
                    .values(vec![
                        Alias::new("upcoming"),
                        Alias::new("live"),
                        Alias::new("completed"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("bet_type"))
                    .values(vec![
                        Alias::new("home"),
                        Alias::new("draw"),
                        Alias::new("away"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("bet_status"))
                    .values(vec![
                        Alias::new("pending"),
                        Alias::new("won"),
                        Alias::new("lost"),
                        Alias::new("canceled"),
                    ])
                    .to_owned(),
            )
            .await?;

        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::Balance)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(Expr::cust("0")),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::LastLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 用户统计（与用户一对一，下注/结算时同步更新）
        manager
            .create_table(
                Table::create()
                    .table(UserStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserStats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserStats::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(UserStats::PendingBets)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserStats::TotalWon)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(Expr::cust("0")),
                    )
                    .col(
                        ColumnDef::new(UserStats::TotalLost)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(Expr::cust("0")),
                    )
                    .col(
                        ColumnDef::new(UserStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 体育分类
        manager
            .create_table(
                Table::create()
                    .table(SportCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SportCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SportCategories::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SportCategories::Slug)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SportCategories::Icon).string_len(50).null())
                    .to_owned(),
            )
            .await?;

        // 球队
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Teams::Logo).string_len(255).null())
                    .col(ColumnDef::new(Teams::CategoryId).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teams_category")
                    .table(Teams::Table)
                    .col(Teams::CategoryId)
                    .to_owned(),
            )
            .await?;

        // 赛事
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::League).string_len(100).not_null())
                    .col(ColumnDef::new(Events::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Events::HomeTeamId).big_integer().not_null())
                    .col(ColumnDef::new(Events::AwayTeamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Events::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::Status)
                            .custom(Alias::new("event_status"))
                            .not_null()
                            .default(Expr::cust("'upcoming'::event_status")),
                    )
                    .col(ColumnDef::new(Events::HomeScore).integer().null())
                    .col(ColumnDef::new(Events::AwayScore).integer().null())
                    .col(ColumnDef::new(Events::Minute).integer().null())
                    .col(ColumnDef::new(Events::HomeOdds).decimal_len(8, 2).not_null())
                    .col(ColumnDef::new(Events::DrawOdds).decimal_len(8, 2).null())
                    .col(ColumnDef::new(Events::AwayOdds).decimal_len(8, 2).not_null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_category")
                    .table(Events::Table)
                    .col(Events::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_status")
                    .table(Events::Table)
                    .col(Events::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_start_time")
                    .table(Events::Table)
                    .col(Events::StartTime)
                    .to_owned(),
            )
            .await?;

        // 分类/球队为静态数据，不提供删除接口，外键不加级联
        manager
            .alter_table(
                Table::alter()
                    .table(Teams::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_teams_category")
                            .from_tbl(Teams::Table)
                            .from_col(Teams::CategoryId)
                            .to_tbl(SportCategories::Table)
                            .to_col(SportCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Events::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_events_category")
                            .from_tbl(Events::Table)
                            .from_col(Events::CategoryId)
                            .to_tbl(SportCategories::Table)
                            .to_col(SportCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Events::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_events_home_team")
                            .from_tbl(Events::Table)
                            .from_col(Events::HomeTeamId)
                            .to_tbl(Teams::Table)
                            .to_col(Teams::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Events::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_events_away_team")
                            .from_tbl(Events::Table)
                            .from_col(Events::AwayTeamId)
                            .to_tbl(Teams::Table)
                            .to_col(Teams::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 投注单（每个用户每场赛事最多一条，重复添加覆盖）
        manager
            .create_table(
                Table::create()
                    .table(BetSlipItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BetSlipItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BetSlipItems::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BetSlipItems::EventId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BetSlipItems::BetType)
                            .custom(Alias::new("bet_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(BetSlipItems::Odds).decimal_len(8, 2).not_null())
                    .col(
                        ColumnDef::new(BetSlipItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bet_slip_items_user_event_unique")
                    .table(BetSlipItems::Table)
                    .col(BetSlipItems::UserId)
                    .col(BetSlipItems::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 注单（odds 在加入投注单时锁定，结算只按此值计算）
        manager
            .create_table(
                Table::create()
                    .table(Bets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bets::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Bets::EventId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bets::BetType)
                            .custom(Alias::new("bet_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bets::Odds).decimal_len(8, 2).not_null())
                    .col(ColumnDef::new(Bets::Amount).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Bets::Status)
                            .custom(Alias::new("bet_status"))
                            .not_null()
                            .default(Expr::cust("'pending'::bet_status")),
                    )
                    .col(
                        ColumnDef::new(Bets::PlacedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Bets::SettledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bets_user")
                    .table(Bets::Table)
                    .col(Bets::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bets_event")
                    .table(Bets::Table)
                    .col(Bets::EventId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bets_status")
                    .table(Bets::Table)
                    .col(Bets::Status)
                    .to_owned(),
            )
            .await?;

        // 促销活动
        manager
            .create_table(
                Table::create()
                    .table(Promotions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Promotions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Promotions::Title).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Promotions::Description)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Promotions::ImageUrl)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Promotions::Category)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Promotions::Code).string_len(50).null())
                    .col(
                        ColumnDef::new(Promotions::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Promotions::Terms).text().not_null())
                    .col(
                        ColumnDef::new(Promotions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Promotions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Promotions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 充值流水
        manager
            .create_table(
                Table::create()
                    .table(Deposits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deposits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Deposits::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Deposits::Amount).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Deposits::CardLast4)
                            .string_len(4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deposits::Reference)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Deposits::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deposits_user")
                    .table(Deposits::Table)
                    .col(Deposits::UserId)
                    .to_owned(),
            )
            .await?;

        // 留言
        manager
            .create_table(
                Table::create()
                    .table(ContactMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactMessages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContactMessages::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactMessages::Email)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactMessages::Subject)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactMessages::Message).text().not_null())
                    .col(
                        ColumnDef::new(ContactMessages::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序与创建相反
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(ContactMessages::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Deposits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Promotions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Bets::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(BetSlipItems::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(SportCategories::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(UserStats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("bet_status")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("bet_type")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("event_status")).to_owned())
            .await?;
        Ok(())
    }
}
