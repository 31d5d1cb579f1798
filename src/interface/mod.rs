//! Interface layer
//! CLI 파싱과 대화형 쉘을 담당한다.

pub mod cli;
