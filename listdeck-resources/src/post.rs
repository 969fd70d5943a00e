//! The post resource: `/system/post`.

use crate::STATUS_DICTIONARY_KEY;
use async_trait::async_trait;
use listdeck_api::RestClient;
use listdeck_core::{
    BindingError, ListRequest, ListRow, ResourceBinding, ResourceDescriptor, RowId, RowPage,
    SortState,
};
use serde::{Deserialize, Serialize};

const LIST_PATH: &str = "/system/post/list";
const EXPORT_PATH: &str = "/system/post/excel";
const COMMAND_PATH: &str = "/system/post";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFilter {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub post_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub post_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRow {
    pub post_id: RowId,
    pub post_code: String,
    pub post_name: String,
    pub post_sort: i64,
    pub status: i64,
    #[serde(default)]
    pub status_str: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    pub create_time: String,
}

impl ListRow for PostRow {
    fn row_id(&self) -> RowId {
        self.post_id
    }
}

/// Create-post command; the server assigns the id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPostCommand {
    pub post_code: String,
    pub post_name: String,
    pub post_sort: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostCommand {
    pub post_id: RowId,
    #[serde(flatten)]
    pub fields: AddPostCommand,
}

pub struct PostBinding {
    client: RestClient,
    descriptor: ResourceDescriptor,
}

impl PostBinding {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            descriptor: ResourceDescriptor::new(
                "post",
                SortState::ascending("postSort"),
                STATUS_DICTIONARY_KEY,
            ),
        }
    }

    pub async fn create(&self, command: &AddPostCommand) -> Result<(), BindingError> {
        self.client
            .post_command(COMMAND_PATH, command)
            .await
            .map_err(BindingError::from)
    }

    pub async fn update(&self, command: &UpdatePostCommand) -> Result<(), BindingError> {
        self.client
            .put_command(COMMAND_PATH, command)
            .await
            .map_err(BindingError::from)
    }
}

#[async_trait]
impl ResourceBinding for PostBinding {
    type Filter = PostFilter;
    type Row = PostRow;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn list(&self, request: &ListRequest) -> Result<RowPage<PostRow>, BindingError> {
        self.client
            .get_page(LIST_PATH, request)
            .await
            .map_err(BindingError::from)
    }

    async fn remove(&self, ids: &[RowId]) -> Result<(), BindingError> {
        self.client
            .delete_ids(COMMAND_PATH, ids)
            .await
            .map_err(BindingError::from)
    }

    async fn export(&self, request: &ListRequest, file_name: &str) -> Result<(), BindingError> {
        self.client
            .download(EXPORT_PATH, request, file_name)
            .await
            .map(|_| ())
            .map_err(BindingError::from)
    }
}
