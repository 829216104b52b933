use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

pub async fn ensure_indexes(db: &Database) -> Result<(), String> {
    // users: unique email
    {
        let col = db.collection::<mongodb::bson::Document>("users");
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // users: unique username
    {
        let col = db.collection::<mongodb::bson::Document>("users");
        let model = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // trackers: list per user, newest first; cron scans by status
    {
        let col = db.collection::<mongodb::bson::Document>("trackers");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;

        let model = IndexModel::builder()
            .keys(doc! { "status": 1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // results: cheapest-first and newest-first queries per tracker
    {
        let col = db.collection::<mongodb::bson::Document>("results");
        let model = IndexModel::builder()
            .keys(doc! { "tracker_id": 1, "price": 1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;

        let model = IndexModel::builder()
            .keys(doc! { "tracker_id": 1, "observed_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // reports: latest report per tracker drives cadence gating
    {
        let col = db.collection::<mongodb::bson::Document>("reports");
        let model = IndexModel::builder()
            .keys(doc! { "tracker_id": 1, "sent_at": -1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| e.to_string())?;
    }

    // checks: list per user, newest first
    {
        let col = db.collection::<mongodb::bson::Document>("checks");
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        let _ = col.create_index(model, None).await;
    }

    Ok(())
}
