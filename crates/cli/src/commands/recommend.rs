use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use solocart_core::{
    FlatIpIndex, ProfileEmbedder, RecommendationBatch, RecommendationEngine, TextVectorizer,
    UserActivityRecord, UserId, UserProfile, UserProfiler,
};

use crate::commands::{load_catalog, load_config, CommandResult};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone)]
pub struct RecommendArgs {
    pub catalog: PathBuf,
    pub profiles: PathBuf,
    pub user: u64,
    pub top_k: Option<usize>,
    pub config: Option<PathBuf>,
    pub new_user: bool,
}

pub fn run(args: &RecommendArgs) -> CommandResult {
    let config = match load_config(COMMAND, args.config.as_deref()) {
        Ok(config) => config,
        Err(result) => return *result,
    };

    let catalog = match load_catalog(COMMAND, &args.catalog) {
        Ok(catalog) => Arc::new(catalog),
        Err(result) => return *result,
    };

    let activity = match load_activity(&args.profiles) {
        Ok(activity) => activity,
        Err(result) => return *result,
    };

    let profiler = UserProfiler::from_today();
    let profiles: HashMap<UserId, UserProfile> = activity
        .iter()
        .map(|record| {
            let profile = profiler.build(record);
            (profile.user_id, profile)
        })
        .collect();

    let user_id = UserId(args.user);
    let default_top_k = config.top_k;

    let vectorizer = TextVectorizer::default();
    let index = Arc::new(FlatIpIndex::for_catalog(&catalog, &vectorizer));
    let embedder = Arc::new(ProfileEmbedder::new(vectorizer));
    let engine = RecommendationEngine::new(catalog, profiles, embedder, index, config);

    let recommendations = if args.new_user {
        let Some(record) = activity.iter().find(|record| record.user_id == args.user) else {
            return CommandResult::failure(
                COMMAND,
                "unknown_user",
                format!("user {} not present in the activity snapshot", args.user),
                4,
            );
        };
        let top_k = args.top_k.unwrap_or(default_top_k);
        engine.recommend_for_new_user(&profiler.build(record), top_k)
    } else {
        match args.top_k {
            Some(top_k) => engine.recommend(user_id, top_k),
            None => engine.recommend_default(user_id),
        }
    };

    CommandResult::success(COMMAND, RecommendationBatch::now(user_id, recommendations))
}

fn load_activity(path: &Path) -> Result<Vec<UserActivityRecord>, Box<CommandResult>> {
    let raw = fs::read_to_string(path).map_err(|error| {
        Box::new(CommandResult::failure(
            COMMAND,
            "snapshot_io",
            format!("failed to read activity snapshot {}: {error}", path.display()),
            3,
        ))
    })?;
    serde_json::from_str(&raw).map_err(|error| {
        Box::new(CommandResult::failure(
            COMMAND,
            "snapshot_parse",
            format!("failed to parse activity snapshot: {error}"),
            3,
        ))
    })
}
