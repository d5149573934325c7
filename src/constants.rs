pub const API_NAME: &str = "[car-inventory-api]";

/// Fields a car document may be created with and later edited.
pub const MUTABLE_CAR_FIELDS: [&str; 7] = [
    "make",
    "model",
    "release_date",
    "transmission_type",
    "size",
    "style",
    "price",
];

/// Query keys accepted by the car listing unless `CAR_FILTER_KEYS` overrides them.
pub const DEFAULT_FILTER_KEYS: [&str; 4] = ["type", "search", "page", "limit"];

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

pub const MEMORY_DATABASE_URL: &str = "memory://";
