//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// roster fixtures. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_control_tables: bool,

    // Database fixtures to insert
    alliances: Vec<i32>,
    control_settings: Vec<(i32, Option<i64>, i32)>, // (alliance_id, channel_id, interval)
    members: Vec<(i64, i32)>,                       // (fid, alliance_id)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_control_tables: false,
            alliances: Vec::new(),
            control_settings: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Add every table used by alliance control to the test database.
    ///
    /// Creates Alliance, AllianceSetting, Member, FurnaceChange, NicknameChange and InvalidId.
    pub fn with_control_tables(mut self) -> Self {
        self.include_control_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use whiteout_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), whiteout_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Alliance)
    ///     .with_table(Member)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert an alliance with default name and guild.
    pub fn with_alliance(mut self, alliance_id: i32) -> Self {
        self.alliances.push(alliance_id);
        self
    }

    /// Insert control settings for an alliance.
    ///
    /// Transfer flags default to disabled and no start time is set. The alliance must be
    /// added via `with_alliance` before calling this method.
    pub fn with_control_setting(
        mut self,
        alliance_id: i32,
        channel_id: Option<i64>,
        interval: i32,
    ) -> Self {
        self.control_settings
            .push((alliance_id, channel_id, interval));
        self
    }

    /// Insert a roster member with default player data.
    pub fn with_member(mut self, fid: i64, alliance_id: i32) -> Self {
        self.members.push((fid, alliance_id));
        self
    }

    /// Build the test setup by creating all configured tables and fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (control tables if specified, then custom tables)
    /// 2. Inserts alliances, control settings, then members
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_control_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Alliance),
                schema.create_table_from_entity(entity::prelude::AllianceSetting),
                schema.create_table_from_entity(entity::prelude::Member),
                schema.create_table_from_entity(entity::prelude::FurnaceChange),
                schema.create_table_from_entity(entity::prelude::NicknameChange),
                schema.create_table_from_entity(entity::prelude::InvalidId),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for alliance_id in self.alliances {
            setup.roster().insert_alliance(alliance_id).await?;
        }

        for (alliance_id, channel_id, interval) in self.control_settings {
            setup
                .roster()
                .insert_control_setting(alliance_id, channel_id, interval)
                .await?;
        }

        for (fid, alliance_id) in self.members {
            setup.roster().insert_member(fid, alliance_id).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
