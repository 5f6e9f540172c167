/// Uploads are copied to disk through a buffer of this size
pub const UPLOAD_CHUNK_SIZE: usize = 1024 * 1024;

/// Header line placed between the user's message and the uploaded file names
pub const FILE_LIST_HEADER: &str = "List of file name:";

/// Capacity of the channel between the agent task and the HTTP body
pub const STREAM_CHANNEL_CAPACITY: usize = 64;
