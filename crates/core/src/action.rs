//! Backend action set
//!
//! The backend exposes a single endpoint and dispatches on an `action`
//! string. Requests are constructed from this enum only; there is no
//! raw-string path, so an unspecified or misspelled action cannot reach
//! the wire.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Wire shape of an action: reads go out as GET query parameters, writes
/// as form-urlencoded POST bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Read,
    Write,
}

/// Returned by [`Action::from_str`] for strings outside the action set
#[derive(Debug, Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

/// One backend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Public reads
    ListPosts,
    GetPost,
    ListCategories,
    ListAwards,
    ListPublications,
    GetProfile,
    GetSocialLinks,
    Search,
    GetDonateInfo,
    // Admin reads
    ListUsers,
    CheckSuperAdmin,
    // Auth writes
    Login,
    RefreshToken,
    Logout,
    // Admin writes
    CreatePost,
    UpdatePost,
    DeletePost,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    CreateAward,
    UpdateAward,
    DeleteAward,
    CreatePublication,
    UpdatePublication,
    DeletePublication,
    CreateSocialLink,
    UpdateSocialLink,
    DeleteSocialLink,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ChangePassword,
    UploadMedia,
    DeleteMedia,
    UpdateProfile,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: &'static [Action] = &[
        Action::ListPosts,
        Action::GetPost,
        Action::ListCategories,
        Action::ListAwards,
        Action::ListPublications,
        Action::GetProfile,
        Action::GetSocialLinks,
        Action::Search,
        Action::GetDonateInfo,
        Action::ListUsers,
        Action::CheckSuperAdmin,
        Action::Login,
        Action::RefreshToken,
        Action::Logout,
        Action::CreatePost,
        Action::UpdatePost,
        Action::DeletePost,
        Action::CreateCategory,
        Action::UpdateCategory,
        Action::DeleteCategory,
        Action::CreateAward,
        Action::UpdateAward,
        Action::DeleteAward,
        Action::CreatePublication,
        Action::UpdatePublication,
        Action::DeletePublication,
        Action::CreateSocialLink,
        Action::UpdateSocialLink,
        Action::DeleteSocialLink,
        Action::CreateUser,
        Action::UpdateUser,
        Action::DeleteUser,
        Action::ChangePassword,
        Action::UploadMedia,
        Action::DeleteMedia,
        Action::UpdateProfile,
    ];

    /// The wire discriminator sent in the `action` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListPosts => "listPosts",
            Self::GetPost => "getPost",
            Self::ListCategories => "listCategories",
            Self::ListAwards => "listAwards",
            Self::ListPublications => "listPublications",
            Self::GetProfile => "getProfile",
            Self::GetSocialLinks => "getSocialLinks",
            Self::Search => "search",
            Self::GetDonateInfo => "getDonateInfo",
            Self::ListUsers => "listUsers",
            Self::CheckSuperAdmin => "checkSuperAdmin",
            Self::Login => "login",
            Self::RefreshToken => "refreshToken",
            Self::Logout => "logout",
            Self::CreatePost => "createPost",
            Self::UpdatePost => "updatePost",
            Self::DeletePost => "deletePost",
            Self::CreateCategory => "createCategory",
            Self::UpdateCategory => "updateCategory",
            Self::DeleteCategory => "deleteCategory",
            Self::CreateAward => "createAward",
            Self::UpdateAward => "updateAward",
            Self::DeleteAward => "deleteAward",
            Self::CreatePublication => "createPublication",
            Self::UpdatePublication => "updatePublication",
            Self::DeletePublication => "deletePublication",
            Self::CreateSocialLink => "createSocialLink",
            Self::UpdateSocialLink => "updateSocialLink",
            Self::DeleteSocialLink => "deleteSocialLink",
            Self::CreateUser => "createUser",
            Self::UpdateUser => "updateUser",
            Self::DeleteUser => "deleteUser",
            Self::ChangePassword => "changePassword",
            Self::UploadMedia => "uploadMedia",
            Self::DeleteMedia => "deleteMedia",
            Self::UpdateProfile => "updateProfile",
        }
    }

    /// How the request is serialized on the wire
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::ListPosts
            | Self::GetPost
            | Self::ListCategories
            | Self::ListAwards
            | Self::ListPublications
            | Self::GetProfile
            | Self::GetSocialLinks
            | Self::Search
            | Self::GetDonateInfo
            | Self::ListUsers
            | Self::CheckSuperAdmin => ActionKind::Read,
            _ => ActionKind::Write,
        }
    }

    /// Whether the request carries the session token (as a query pair for
    /// reads, a form field for writes). Login and refresh establish the
    /// session and carry none.
    pub fn requires_token(&self) -> bool {
        match self {
            Self::ListPosts
            | Self::GetPost
            | Self::ListCategories
            | Self::ListAwards
            | Self::ListPublications
            | Self::GetProfile
            | Self::GetSocialLinks
            | Self::Search
            | Self::GetDonateInfo
            | Self::Login
            | Self::RefreshToken => false,
            _ => true,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
