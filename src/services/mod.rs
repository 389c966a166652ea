// Service exports
pub mod auth;
pub mod cache;
pub mod postgres;
pub mod sessions;
pub mod supabase;

pub use auth::{bearer_token, decode_claims, AuthError, Claims};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use postgres::{PostgresClient, PostgresError, RegistrationOutcome};
pub use sessions::SessionStore;
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
