//! Domain layer
//! 비즈니스 규칙(플래그 카탈로그/명령 조립/검증 정책)을 외부 의존성 없이 표현한다.

pub mod catalog;
pub mod command;
pub mod history;
pub mod portspec;
pub mod target;
