use std::{
    collections::{HashMap, HashSet},
    sync::RwLock,
};

use async_trait::async_trait;
use hubsync_database_interface::{DbService, Result};
use hubsync_models::{Comment, Deploy, PullRequest, Repository, Team, User};

#[derive(Debug, Default)]
pub struct MemoryDb {
    users: RwLock<HashMap<u64, User>>,
    teams: RwLock<HashMap<u64, Team>>,
    memberships: RwLock<HashSet<(u64, u64)>>,
    repositories: RwLock<HashMap<u64, Repository>>,
    pull_requests: RwLock<HashMap<u64, PullRequest>>,
    comments: RwLock<HashMap<u64, Comment>>,
    deploys: RwLock<HashMap<u64, Deploy>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn get_last_deploy_id(&self) -> u64 {
        self.deploys
            .read()
            .unwrap()
            .keys()
            .max()
            .copied()
            .unwrap_or(0)
            + 1
    }
}

#[async_trait]
impl DbService for MemoryDb {
    ////////
    // Users

    async fn users_create(&self, instance: User) -> Result<User> {
        self.users
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn users_update(&self, instance: User) -> Result<User> {
        self.users
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn users_get(&self, id: u64) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    async fn users_get_by_login(&self, login: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.login == login)
            .cloned())
    }

    async fn users_all(&self) -> Result<Vec<User>> {
        let mut values: Vec<_> = self.users.read().unwrap().values().cloned().collect();
        values.sort_by(|a, b| a.login.cmp(&b.login));
        Ok(values)
    }

    ////////
    // Teams

    async fn teams_create(&self, instance: Team) -> Result<Team> {
        self.teams
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn teams_update(&self, instance: Team) -> Result<Team> {
        self.teams
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn teams_get(&self, id: u64) -> Result<Option<Team>> {
        Ok(self.teams.read().unwrap().get(&id).cloned())
    }

    async fn teams_all(&self) -> Result<Vec<Team>> {
        let mut values: Vec<_> = self.teams.read().unwrap().values().cloned().collect();
        values.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(values)
    }

    async fn teams_list_active(&self) -> Result<Vec<Team>> {
        let mut values: Vec<_> = self
            .teams
            .read()
            .unwrap()
            .values()
            .filter(|t| t.active)
            .cloned()
            .collect();
        values.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(values)
    }

    async fn teams_tombstone_not_in(&self, observed_ids: &[u64]) -> Result<Vec<Team>> {
        let mut teams = self.teams.write().unwrap();
        let mut tombstoned = vec![];

        for team in teams.values_mut() {
            if team.active && !observed_ids.contains(&team.id) {
                team.active = false;
                tombstoned.push(team.clone());
            }
        }

        tombstoned.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tombstoned)
    }

    async fn memberships_replace(&self, team_id: u64, user_ids: &[u64]) -> Result<()> {
        self.teams_get_expect(team_id).await?;

        let mut memberships = self.memberships.write().unwrap();
        memberships.retain(|(t, _)| *t != team_id);
        for user_id in user_ids {
            memberships.insert((team_id, *user_id));
        }

        Ok(())
    }

    async fn memberships_list(&self, team_id: u64) -> Result<Vec<u64>> {
        let mut values: Vec<_> = self
            .memberships
            .read()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == team_id)
            .map(|(_, u)| *u)
            .collect();
        values.sort_unstable();
        Ok(values)
    }

    ///////////////
    // Repositories

    async fn repositories_create(&self, instance: Repository) -> Result<Repository> {
        self.repositories
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn repositories_update(&self, instance: Repository) -> Result<Repository> {
        self.repositories
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn repositories_get(&self, id: u64) -> Result<Option<Repository>> {
        Ok(self.repositories.read().unwrap().get(&id).cloned())
    }

    async fn repositories_get_by_path(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Repository>> {
        Ok(self
            .repositories
            .read()
            .unwrap()
            .values()
            .find(|r| r.owner == owner && r.name == name)
            .cloned())
    }

    async fn repositories_all(&self) -> Result<Vec<Repository>> {
        let mut values: Vec<_> = self.repositories.read().unwrap().values().cloned().collect();
        values.sort_by_key(|r| (r.owner.clone(), r.name.clone()));
        Ok(values)
    }

    ////////////////
    // Pull requests

    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        self.repositories_get_expect(instance.repository_id)
            .await?;
        self.pull_requests
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest> {
        self.pull_requests
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn pull_requests_get(&self, id: u64) -> Result<Option<PullRequest>> {
        Ok(self.pull_requests.read().unwrap().get(&id).cloned())
    }

    async fn pull_requests_get_by_number(
        &self,
        repository_id: u64,
        number: u64,
    ) -> Result<Option<PullRequest>> {
        Ok(self
            .pull_requests
            .read()
            .unwrap()
            .values()
            .find(|p| p.repository_id == repository_id && p.number == number)
            .cloned())
    }

    async fn pull_requests_list_for_repository(
        &self,
        repository_id: u64,
    ) -> Result<Vec<PullRequest>> {
        let mut values: Vec<_> = self
            .pull_requests
            .read()
            .unwrap()
            .values()
            .filter(|p| p.repository_id == repository_id)
            .cloned()
            .collect();
        values.sort_by_key(|p| p.number);
        Ok(values)
    }

    async fn pull_requests_list_for_deploy(&self, deploy_id: u64) -> Result<Vec<PullRequest>> {
        let mut values: Vec<_> = self
            .pull_requests
            .read()
            .unwrap()
            .values()
            .filter(|p| p.deploy_id == Some(deploy_id))
            .cloned()
            .collect();
        values.sort_by_key(|p| p.number);
        Ok(values)
    }

    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>> {
        let mut values: Vec<_> = self.pull_requests.read().unwrap().values().cloned().collect();
        values.sort_by_key(|p| (p.repository_id, p.number));
        Ok(values)
    }

    async fn pull_requests_set_labels(&self, id: u64, labels: &[String]) -> Result<PullRequest> {
        let mut pull_request = self.pull_requests_get_expect(id).await?;
        pull_request.labels = labels.to_vec();
        self.pull_requests
            .write()
            .unwrap()
            .insert(id, pull_request.clone());
        Ok(pull_request)
    }

    async fn pull_requests_attach_deploy(&self, id: u64, deploy_id: u64) -> Result<PullRequest> {
        let mut pull_request = self.pull_requests_get_expect(id).await?;
        pull_request.deploy_id = Some(deploy_id);
        self.pull_requests
            .write()
            .unwrap()
            .insert(id, pull_request.clone());
        Ok(pull_request)
    }

    ///////////
    // Comments

    async fn comments_create(&self, instance: Comment) -> Result<Comment> {
        self.comments
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn comments_update(&self, instance: Comment) -> Result<Comment> {
        self.comments
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn comments_get(&self, id: u64) -> Result<Option<Comment>> {
        Ok(self.comments.read().unwrap().get(&id).cloned())
    }

    async fn comments_list_for_pull_request(&self, pull_request_id: u64) -> Result<Vec<Comment>> {
        let mut values: Vec<_> = self
            .comments
            .read()
            .unwrap()
            .values()
            .filter(|c| c.pull_request_id == pull_request_id)
            .cloned()
            .collect();
        values.sort_by_key(|c| c.created_at);
        Ok(values)
    }

    //////////
    // Deploys

    async fn deploys_create(&self, mut instance: Deploy) -> Result<Deploy> {
        self.repositories_get_expect(instance.repository_id)
            .await?;

        if instance.id == 0 {
            instance.id = self.get_last_deploy_id();
        }
        self.deploys
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn deploys_update(&self, instance: Deploy) -> Result<Deploy> {
        self.deploys
            .write()
            .unwrap()
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn deploys_get(&self, id: u64) -> Result<Option<Deploy>> {
        Ok(self.deploys.read().unwrap().get(&id).cloned())
    }

    async fn deploys_get_by_revision(
        &self,
        repository_id: u64,
        git_revision: &str,
    ) -> Result<Option<Deploy>> {
        Ok(self
            .deploys
            .read()
            .unwrap()
            .values()
            .find(|d| d.repository_id == repository_id && d.git_revision == git_revision)
            .cloned())
    }

    async fn deploys_all(&self) -> Result<Vec<Deploy>> {
        let mut values: Vec<_> = self.deploys.read().unwrap().values().cloned().collect();
        values.sort_by_key(|d| d.id);
        Ok(values)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
