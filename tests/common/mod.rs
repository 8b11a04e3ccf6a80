use nido::modules::users::model::UserRole;
use nido::utils::password::hash_password;
use sqlx::PgPool;

#[allow(dead_code)]
pub struct TestUser {
    pub id: i32,
    pub email: String,
    pub password: String,
}

/// Insert a user directly, bypassing the admin-gated register endpoint.
#[allow(dead_code)]
pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (username, email, password, first_name, last_name, role)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(&hashed)
    .bind("Test")
    .bind("User")
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_classroom(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO classrooms (name, capacity) VALUES ($1, 15) RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}
