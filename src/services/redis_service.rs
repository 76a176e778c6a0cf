use async_trait::async_trait;
use redis::{Client, AsyncCommands, Script};
use std::sync::Arc;
use serde::de::DeserializeOwned;
use crate::errors::{StoreError, StoreResult};
use crate::models::{User, Vote, VotedMarker};
use super::store::VoteStore;

const VOTES_KEY: &str = "votes";

// Field-level update: the stored document is only touched while its phone
// still matches, so a registration racing the verification is never undone.
const SET_VERIFIED_SCRIPT: &str = r#"
local data = redis.call('GET', KEYS[1])
if not data then
    return 0
end
local user = cjson.decode(data)
if user.phone ~= ARGV[1] then
    return 0
end
user.verified = true
redis.call('SET', KEYS[1], cjson.encode(user))
return 1
"#;

// Drops index members whose user is gone or now has another phone. The
// check is repeated inside the script so a concurrent re-registration back
// onto this phone keeps its entry.
const PRUNE_PHONE_INDEX_SCRIPT: &str = r#"
local removed = 0
for i = 2, #ARGV do
    local data = redis.call('GET', 'user:' .. ARGV[i])
    if not data or cjson.decode(data).phone ~= ARGV[1] then
        removed = removed + redis.call('SREM', KEYS[1], ARGV[i])
    end
end
return removed
"#;

fn user_key(email: &str) -> String {
    format!("user:{}", email)
}

fn phone_index_key(phone: &str) -> String {
    format!("users:phone:{}", phone)
}

fn voted_key(uid: &str) -> String {
    format!("voted:{}", uid)
}

fn decode<T: DeserializeOwned>(key: &str, data: &str) -> StoreResult<T> {
    serde_json::from_str(data).map_err(|source| StoreError::Decode {
        key: key.to_string(),
        source,
    })
}

#[derive(Clone)]
pub struct RedisService {
    client: Arc<Client>,
}

impl RedisService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VoteStore for RedisService {
    async fn get_user(&self, email: &str) -> StoreResult<Option<User>> {
        let mut conn = self.client.get_async_connection().await?;
        let key = user_key(email);
        let user_data: Option<String> = conn.get(&key).await?;
        user_data.map(|data| decode(&key, &data)).transpose()
    }

    async fn save_user(&self, user: &User) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        let data = serde_json::to_string(user)?;
        redis::pipe()
            .atomic()
            .set(user_key(&user.email), data)
            .ignore()
            .sadd(phone_index_key(&user.phone), &user.email)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn find_users_by_phone(&self, phone: &str) -> StoreResult<Vec<User>> {
        let mut conn = self.client.get_async_connection().await?;
        let emails: Vec<String> = conn.smembers(phone_index_key(phone)).await?;

        let mut users = Vec::with_capacity(emails.len());
        let mut stale = Vec::new();
        for email in emails {
            let key = user_key(&email);
            let user_data: Option<String> = conn.get(&key).await?;
            // Index entries go stale when a user re-registers with another phone.
            match user_data {
                Some(data) => {
                    let user: User = decode(&key, &data)?;
                    if user.phone == phone {
                        users.push(user);
                    } else {
                        stale.push(email);
                    }
                }
                None => stale.push(email),
            }
        }

        if !stale.is_empty() {
            let removed: i64 = Script::new(PRUNE_PHONE_INDEX_SCRIPT)
                .key(phone_index_key(phone))
                .arg(phone)
                .arg(&stale)
                .invoke_async(&mut conn)
                .await?;
            tracing::debug!("Pruned {} stale phone index entries for {}", removed, phone);
        }
        Ok(users)
    }

    async fn set_verified(&self, email: &str, phone: &str) -> StoreResult<bool> {
        let mut conn = self.client.get_async_connection().await?;
        let updated: i64 = Script::new(SET_VERIFIED_SCRIPT)
            .key(user_key(email))
            .arg(phone)
            .invoke_async(&mut conn)
            .await?;
        Ok(updated == 1)
    }

    async fn mark_voted(&self, uid: &str) -> StoreResult<bool> {
        let mut conn = self.client.get_async_connection().await?;
        let marker = serde_json::to_string(&VotedMarker::default())?;
        // SET NX: only the first writer creates the marker.
        Ok(conn.set_nx::<_, _, bool>(voted_key(uid), marker).await?)
    }

    async fn append_vote(&self, vote: &Vote) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.rpush::<_, _, ()>(VOTES_KEY, serde_json::to_string(vote)?).await?;
        Ok(())
    }

    async fn list_votes(&self) -> StoreResult<Vec<Vote>> {
        let mut conn = self.client.get_async_connection().await?;
        let entries: Vec<String> = conn.lrange(VOTES_KEY, 0, -1).await?;
        entries.iter().map(|data| decode(VOTES_KEY, data)).collect()
    }
}
