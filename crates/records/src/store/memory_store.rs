//! 内存存储
//!
//! 保持插入顺序的内存集合。每个操作在同一把锁内完成完整的读-改-写，
//! 多线程下不会出现交错修改。

use parking_lot::Mutex;
use uuid::Uuid;

use crate::models::Record;

/// 生成器给出的 ID 连续冲突时的最大重试次数，超出后改用系统随机 UUID
const MAX_ID_ATTEMPTS: usize = 8;

/// 通用有序内存存储
#[derive(Debug)]
pub struct MemoryStore<T> {
    items: Mutex<Vec<T>>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    /// 创建新的内存存储实例
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// 按 ID 获取记录的副本
    pub fn get(&self, id: &str) -> Option<T> {
        self.items
            .lock()
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// 列出所有记录
    ///
    /// 返回按插入顺序排列的副本，调用方修改结果不会影响内部状态
    pub fn list(&self) -> Vec<T> {
        self.items.lock().clone()
    }

    /// 追加一条记录
    ///
    /// 在同一把锁内从 `next_id` 取得一个未被占用的 ID，再交给 `build` 构造记录
    pub fn push_unique<N, B>(&self, mut next_id: N, build: B) -> T
    where
        N: FnMut() -> String,
        B: FnOnce(String) -> T,
    {
        let mut items = self.items.lock();

        let id = (0..MAX_ID_ATTEMPTS)
            .map(|_| next_id())
            .find(|candidate| !candidate.is_empty() && !items.iter().any(|i| i.id() == candidate))
            .unwrap_or_else(|| loop {
                let candidate = Uuid::new_v4().to_string();
                if !items.iter().any(|i| i.id() == candidate) {
                    break candidate;
                }
            });

        let item = build(id);
        items.push(item.clone());
        item
    }

    /// 原地修改指定记录
    ///
    /// 记录不存在时不做任何修改并返回 None
    pub fn update_with<F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.items.lock();
        let item = items.iter_mut().find(|item| item.id() == id)?;
        f(item);
        Some(item.clone())
    }

    /// 删除记录
    ///
    /// 仅当集合大小确实减少时返回 true
    pub fn remove(&self, id: &str) -> bool {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|item| item.id() != id);
        items.len() < before
    }

    /// 获取记录总数
    pub fn count(&self) -> usize {
        self.items.lock().len()
    }
}
