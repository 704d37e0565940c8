#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
}
