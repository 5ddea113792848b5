pub mod api {

    pub const ANILIST_URL: &str = "https://graphql.anilist.co";

    /// AniList caps `perPage` at 50.
    pub const PAGE_SIZE: u32 = 50;

    /// External ceiling documented by AniList (requests per minute).
    pub const RATE_CEILING_PER_MINUTE: u32 = 90;

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
}

pub mod limits {

    /// Pages the server may claim `hasNextPage` while returning nothing
    /// before the fetch is declared stalled.
    pub const MAX_CONSECUTIVE_EMPTY_PAGES: u32 = 3;

    pub const DEFAULT_TOP_LIMIT: u64 = 10;

    /// Row cap for the per-year report.
    pub const YEAR_REPORT_ROWS: u64 = 10;

    /// Entries shown in the post-fetch sample.
    pub const FETCH_SAMPLE_SIZE: usize = 5;
}

pub mod paths {

    pub const SNAPSHOT_PATH: &str = "data/animes_data.json";

    pub const DATABASE_URL: &str = "sqlite:data/anicat.db";
}
