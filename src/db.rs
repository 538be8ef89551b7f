use std::time::Duration;

use anyhow::{Context, Result};
use arbolitos_riego::models::{PlantDoc, UserDoc};
use arbolitos_riego::{ActionType, Plant, User};
use chrono::{DateTime, Utc};
use futures_util::stream::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::{options::ClientOptions, Client, Collection};
use tracing::{debug, info};

/// Read access to the tracker's collections, plus the quick-water write.
pub struct Store {
    plants: Collection<PlantDoc>,
    users: Collection<UserDoc>,
}

impl Store {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let mut client_options = ClientOptions::parse(uri)
            .await
            .context("Error al parsear URI de MongoDB")?;
        client_options.server_selection_timeout = Some(Duration::from_secs(10));

        let client = Client::with_options(client_options).context("Error al crear cliente MongoDB")?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 })
            .await
            .context("Error al conectar con MongoDB (ping fallido)")?;
        debug!(database, "connected to MongoDB");

        Ok(Self {
            plants: db.collection::<PlantDoc>("plants"),
            users: db.collection::<UserDoc>("users"),
        })
    }

    /// The user's plants, newest first.
    pub async fn plants_of(&self, user_id: &str) -> Result<Vec<Plant>> {
        let oid = parse_id(user_id)?;
        let mut cursor = self
            .plants
            .find(doc! { "userId": oid })
            .sort(doc! { "createdAt": -1 })
            .await
            .context("Error al buscar plantas")?;

        let mut plants = vec![];
        while let Some(plant) = cursor.try_next().await? {
            plants.push(plant.into_plant());
        }
        debug!(user = user_id, count = plants.len(), "plants loaded");
        Ok(plants)
    }

    pub async fn plant(&self, plant_id: &str) -> Result<Option<Plant>> {
        let oid = parse_id(plant_id)?;
        let plant = self
            .plants
            .find_one(doc! { "_id": oid })
            .await
            .context("Error al buscar planta")?;
        Ok(plant.map(PlantDoc::into_plant))
    }

    pub async fn user(&self, user_id: &str) -> Result<Option<User>> {
        let oid = parse_id(user_id)?;
        let user = self
            .users
            .find_one(doc! { "_id": oid })
            .await
            .context("Error al buscar usuario")?;
        Ok(user.map(UserDoc::into_user))
    }

    /// Moves the cycle anchor to `at` and appends a `Watered` care entry.
    /// Returns false when no plant matched.
    pub async fn record_watering(&self, plant_id: &str, at: DateTime<Utc>, notes: &str) -> Result<bool> {
        let oid = parse_id(plant_id)?;
        let at = bson::DateTime::from_chrono(at);
        let update = doc! {
            "$set": { "lastWateredDate": at },
            "$push": {
                "careHistory": {
                    "actionType": ActionType::Watered.as_str(),
                    "date": at,
                    "notes": notes,
                }
            },
        };

        let result = self
            .plants
            .update_one(doc! { "_id": oid }, update)
            .await
            .context("Error al registrar riego")?;
        info!(plant = plant_id, matched = result.matched_count, "watering recorded");
        Ok(result.matched_count > 0)
    }
}

fn parse_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).with_context(|| format!("ID inválido '{}'", raw))
}
