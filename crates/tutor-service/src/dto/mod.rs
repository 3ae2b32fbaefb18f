//! Data Transfer Objects
//!
//! Request and response types for the API surface, plus mappers from
//! domain entities.

mod mappers;
mod requests;
mod responses;

pub use requests::{
    CreateRoomRequest, EnrollmentCreatedRequest, MarkReadRequest, PostCommentRequest,
    PostMessageRequest,
};
pub use responses::{
    CommentResponse, MessageResponse, ProvisionedRoomsResponse, ReadMarkerResponse, RoomResponse,
    UnreadCountResponse,
};
