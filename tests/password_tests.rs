//! 密码哈希功能单元测试
//!
//! 测试 Argon2id 密码哈希和验证功能

use health_system::auth::password::PasswordHasher;

#[test]
fn test_password_hash_and_verify() {
    let hasher = PasswordHasher::new();
    let password = "TestPassword123!";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    // 哈希值应该包含 argon2 标识
    assert!(hash.contains("$argon2"));

    // 验证正确密码
    assert!(hasher.verify(password, &hash));
}

#[test]
fn test_password_verify_with_wrong_password() {
    let hasher = PasswordHasher::new();
    let password = "TestPassword123!";

    let hash = hasher.hash(password).expect("Hashing should succeed");

    // 单字符差异也应该失败
    assert!(!hasher.verify("TestPassword123.", &hash));
    assert!(!hasher.verify("WrongPassword123!", &hash));
}

#[test]
fn test_password_hash_different_each_time() {
    let hasher = PasswordHasher::new();
    let password = "TestPassword123!";

    let hash1 = hasher.hash(password).expect("First hash should succeed");
    let hash2 = hasher.hash(password).expect("Second hash should succeed");

    // 由于随机盐，每次生成的哈希应该不同
    assert_ne!(hash1, hash2, "Hashes should be different due to salt");

    // 但两个哈希都应该能验证同一个密码
    assert!(hasher.verify(password, &hash1));
    assert!(hasher.verify(password, &hash2));
}

#[test]
fn test_password_hash_unicode() {
    let hasher = PasswordHasher::new();
    let password = "密码测试Test123!🔒";

    let hash = hasher.hash(password).expect("Unicode password should hash");

    assert!(hasher.verify(password, &hash));
    assert!(!hasher.verify("密码测试Test123🔒", &hash));
}

#[test]
fn test_password_hasher_default() {
    let hasher1 = PasswordHasher::default();
    let hasher2 = PasswordHasher::new();

    let password = "TestPassword123!";
    let hash1 = hasher1.hash(password).unwrap();
    let hash2 = hasher2.hash(password).unwrap();

    // 两个不同的 hasher 应该都能正常工作
    assert_ne!(hash1, hash2);
    assert!(hasher1.verify(password, &hash1));
    assert!(hasher2.verify(password, &hash2));
}

#[test]
fn test_password_verify_with_invalid_hash() {
    let hasher = PasswordHasher::new();
    let password = "TestPassword123!";

    // 无效的哈希格式按不匹配处理，不报错也不 panic
    assert!(!hasher.verify(password, "invalid_hash"));
    assert!(!hasher.verify(password, "$argon2id$v=19$invalid"));
    assert!(!hasher.verify(password, ""));
}
