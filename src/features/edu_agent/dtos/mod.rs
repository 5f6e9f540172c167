mod chat_dto;
mod tool_dto;

pub use chat_dto::{ChatFormDto, ChatRequestDto};
pub use tool_dto::{
    ExamScheduleOutput, GetAllClassInfoOfOutput, GetAllMaterialInfoOfClassInput,
    GetAllMaterialInfoOfClassOutput, SummaryFileInput, SummaryFileOutput, ToolEnvelope,
    UserInfoInput,
};
