#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleDatabase,
    ConfigModuleProvisioning,
    NoDefaultPreset,

    // === PROJECT MESSAGES ===
    ProjectCreated { name: String, id: i64 },
    ProjectDeleted(i64),
    ProjectsHeader,
    NoProjects,
    ConfirmDeleteProject(String),

    // === PRESET MESSAGES ===
    PresetsHeader,
    PresetHeader(String),
    PresetApplied { preset: String, created: usize, reused: usize },
    PresetWarning(String),

    // === TEMPLATE MESSAGES ===
    TemplatesHeader,
    NoTemplatesFound,
    TemplatesMaterialized { created: usize, skipped: usize },
    RowFailed { key: String, reason: String },
    ConfirmReset(String),
    ResetCompleted { deleted: usize, created: usize },
    ResetProjectLine { name: String, created: usize },

    // === CATEGORY MESSAGES ===
    CategoriesHeader,
    NoCategories,
    CategoryCreated(String),
    CategoryRenamed { from: String, to: String },
    CategoryRecolored(String),
    CategoryReordered(String),
    CategoriesDeleted(usize),
    ConfirmDeleteCategory { name: String, children: usize },

    // === TASK MESSAGES ===
    TasksHeader(String),
    NoTasks,
    TaskCreated(String),
    TaskStatusUpdated { id: i64, status: String },
    TaskNotFound(i64),
    TaskDatesUpdated(i64),
    TaskDeleted(i64),

    // === RECONCILIATION MESSAGES ===
    ResolvedName { stored: String, resolved: String, matched_by: String },

    // === MAINTENANCE MESSAGES ===
    OrphansRemoved { removed: usize, ids: Vec<i64> },
    NoOrphans,

    // === PROMPTS ===
    PromptSelectModules,
    PromptDatabasePath,
    PromptBusyTimeout,
    PromptDefaultPreset,
    PromptMaterializeOnCreate,

    // === GENERAL MESSAGES ===
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
}
