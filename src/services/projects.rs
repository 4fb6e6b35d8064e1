//! Projects and test profiles service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::project::{
        CreateProject, CreateTestProfile, Project, TestProfile, UpdateProject,
        UpdateTestProfile,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ProjectsService {
    repository: Repository,
}

impl ProjectsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Projects ----

    pub async fn list(&self) -> AppResult<Vec<Project>> {
        self.repository.projects.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Project> {
        self.repository.projects.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateProject) -> AppResult<Project> {
        self.repository.projects.create(&data).await
    }

    pub async fn update(&self, id: Uuid, data: UpdateProject) -> AppResult<Project> {
        self.repository.projects.update(id, &data).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.projects.delete(id).await
    }

    // ---- Test profiles ----

    pub async fn list_profiles(&self) -> AppResult<Vec<TestProfile>> {
        self.repository.projects.list_profiles().await
    }

    pub async fn get_profile(&self, id: Uuid) -> AppResult<TestProfile> {
        self.repository.projects.get_profile(id).await
    }

    pub async fn create_profile(&self, data: CreateTestProfile) -> AppResult<TestProfile> {
        self.repository.projects.create_profile(&data).await
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        data: UpdateTestProfile,
    ) -> AppResult<TestProfile> {
        self.repository.projects.update_profile(id, &data).await
    }

    pub async fn delete_profile(&self, id: Uuid) -> AppResult<()> {
        self.repository.projects.delete_profile(id).await
    }
}
