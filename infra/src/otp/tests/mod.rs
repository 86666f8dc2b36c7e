//! Unit tests for OTP module
