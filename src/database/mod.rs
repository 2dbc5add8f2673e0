use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("enrollment");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the hot queries rely on. Duplicate creation is
    /// harmless; the driver reports it and we move on.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("Creating database indexes...");

        // users(email) - duplicate check on registration and role lookups
        let users = self.db.collection::<mongodb::bson::Document>("users");
        let email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();
        match users.create_index(email_index).await {
            Ok(_) => log::info!("   index ready: users(email)"),
            Err(e) => log::debug!("   index users(email): {}", e),
        }

        // classes(class_status) - public listing filters to approved
        let classes = self.db.collection::<mongodb::bson::Document>("classes");
        let status_index = IndexModel::builder()
            .keys(doc! { "class_status": 1 })
            .build();
        match classes.create_index(status_index).await {
            Ok(_) => log::info!("   index ready: classes(class_status)"),
            Err(e) => log::debug!("   index classes(class_status): {}", e),
        }

        // classes(instructor_email) - instructor dashboard listing
        let instructor_index = IndexModel::builder()
            .keys(doc! { "instructor_email": 1 })
            .build();
        match classes.create_index(instructor_index).await {
            Ok(_) => log::info!("   index ready: classes(instructor_email)"),
            Err(e) => log::debug!("   index classes(instructor_email): {}", e),
        }

        // selected_classes(user_email) - student cart listing
        let selected = self
            .db
            .collection::<mongodb::bson::Document>("selected_classes");
        let selected_index = IndexModel::builder()
            .keys(doc! { "user_email": 1 })
            .build();
        match selected.create_index(selected_index).await {
            Ok(_) => log::info!("   index ready: selected_classes(user_email)"),
            Err(e) => log::debug!("   index selected_classes(user_email): {}", e),
        }

        // payments(email) - payment history per student
        let payments = self.db.collection::<mongodb::bson::Document>("payments");
        let payments_index = IndexModel::builder().keys(doc! { "email": 1 }).build();
        match payments.create_index(payments_index).await {
            Ok(_) => log::info!("   index ready: payments(email)"),
            Err(e) => log::debug!("   index payments(email): {}", e),
        }

        log::info!("Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Wrap an existing database handle without connecting or creating
    /// indexes, for handler tests that never reach the store.
    #[cfg(test)]
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }
}
