use std::sync::Arc;
use std::thread;

use crate::collections::{Deque, Stack};
use crate::data_structures::{LruList, Node, SafeList};

fn filled<L>(values: &[i32]) -> L
where
    L: SafeList<i32> + Default,
{
    let list = L::default();
    for &value in values {
        list.append(value);
    }
    list
}

/// Test append, prepend, pops and accessors on a fresh list
pub fn test_basic_operations<L>()
where
    L: SafeList<i32> + Default,
{
    let list = L::default();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.pop(), None);
    assert_eq!(list.pop_first(), None);

    assert!(list.append(2));
    assert!(list.append(3));
    assert!(list.prepend(1));
    assert_eq!(list.len(), 3);
    assert!(!list.is_empty());
    assert_eq!(list.first(), Some(1));
    assert_eq!(list.last(), Some(3));
    assert_eq!(list.to_vec(), vec![1, 2, 3]);

    assert_eq!(list.pop(), Some(3));
    assert_eq!(list.pop_first(), Some(1));
    assert_eq!(list.pop(), Some(2));
    assert_eq!(list.pop(), None);
    assert!(list.is_empty());
}

/// Test that the last of k appends is popped first and the (k+1)-th pop fails
pub fn test_pop_after_appends<L>(count: i32)
where
    L: SafeList<i32> + Default,
{
    let list = L::default();
    for i in 1..=count {
        list.append(i);
    }
    for i in (1..=count).rev() {
        assert_eq!(list.pop(), Some(i));
    }
    assert_eq!(list.pop(), None);
}

/// Test insert at `index` into [1, 2, 3]; `expected == None` means rejected
pub fn test_insert_at<L>(index: usize, expected: Option<Vec<i32>>)
where
    L: SafeList<i32> + Default,
{
    let list: L = filled(&[1, 2, 3]);
    let inserted = list.insert(index, 9);
    match expected {
        Some(values) => {
            assert!(inserted);
            assert_eq!(list.to_vec(), values);
        }
        None => {
            assert!(!inserted);
            assert_eq!(list.to_vec(), vec![1, 2, 3]);
        }
    }
}

/// Test positional get/set/delete/remove including out of range indices
pub fn test_positional_operations<L>()
where
    L: SafeList<i32> + Default,
{
    let list: L = filled(&[10, 20, 30, 40]);

    assert_eq!(list.get(0), Some(10));
    assert_eq!(list.get(3), Some(40));
    assert_eq!(list.get(4), None);
    assert_eq!(list.get_and_apply(2, |v| v * 2), Some(60));
    assert_eq!(list.get_and_apply(9, |v| v * 2), None);

    assert!(list.set(1, 21));
    assert!(!list.set(4, 50));
    assert_eq!(list.to_vec(), vec![10, 21, 30, 40]);

    assert!(list.delete(0));
    assert!(!list.delete(3));
    assert_eq!(list.remove(1), Some(30));
    assert_eq!(list.remove(5), None);
    assert_eq!(list.to_vec(), vec![21, 40]);

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.first(), None);
}

/// Test that traversal yields head to tail and can be restarted
pub fn test_traversal<L>()
where
    L: SafeList<i32> + Default,
{
    let list: L = filled(&[1, 2, 3, 4, 5]);
    let values: Vec<i32> = list.iter().collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);

    let mut seen = Vec::new();
    list.for_each(|v| seen.push(*v));
    assert_eq!(seen, values);

    let empty = L::default();
    assert_eq!(empty.iter().next(), None);
}

/// Test that an abandoned traversal does not block writers
pub fn test_abandoned_traversal_releases<L>()
where
    L: SafeList<i32> + Default,
{
    let list: L = filled(&[1, 2, 3]);

    {
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(1));
    }
    assert!(list.append(4));

    let mut iter = list.iter();
    let taken: Vec<i32> = iter.by_ref().take(2).collect();
    assert_eq!(taken, vec![1, 2]);
    drop(iter);
    assert_eq!(list.pop_first(), Some(1));

    // Drained iterators release too, even while still in scope.
    let mut iter = list.iter();
    assert_eq!(iter.by_ref().count(), 3);
    assert!(list.prepend(0));
    assert_eq!(iter.next(), None);
    drop(iter);
    assert_eq!(list.to_vec(), vec![0, 2, 3, 4]);
}

/// Test that an abandoned traversal on another thread does not block writers
pub fn test_abandoned_traversal_across_threads<L>()
where
    L: SafeList<i32> + Default + Send + Sync + 'static,
{
    let list: Arc<L> = Arc::new(filled(&[1, 2, 3]));

    let reader = {
        let list = Arc::clone(&list);
        thread::spawn(move || {
            let mut iter = list.iter();
            iter.next()
        })
    };
    assert_eq!(reader.join().unwrap(), Some(1));

    let writer = {
        let list = Arc::clone(&list);
        thread::spawn(move || list.append(4))
    };
    assert!(writer.join().unwrap());
    assert_eq!(list.len(), 4);
}

/// Test append_node / prepend_node with caller-constructed nodes
pub fn test_append_and_prepend_node<L>()
where
    L: LruList<i32> + Default,
{
    let list = L::default();
    assert!(list.append_node(Node::new(1)));

    let list: L = filled(&[1, 2]);
    let node = Node::new(3);
    let handle = node.handle();
    assert!(list.append_node(node));
    assert!(list.prepend_node(Node::new(0)));
    assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    assert_eq!(list.get_node(3), Some(handle));
}

/// Test that pop_node / pop_first_node return detached nodes that can be
/// relinked without reallocating
pub fn test_pop_node_and_relink<L>()
where
    L: LruList<i32> + Default,
{
    let list: L = filled(&[1, 2, 3]);
    let tail = list.get_node(2).unwrap();

    let node = list.pop_node().unwrap();
    assert_eq!(node.handle(), tail);
    assert_eq!(*node.value(), 3);
    assert_eq!(list.to_vec(), vec![1, 2]);

    assert!(list.prepend_node(node));
    assert_eq!(list.to_vec(), vec![3, 1, 2]);
    assert_eq!(list.get_node(0), Some(tail));

    let node = list.pop_first_node().unwrap();
    assert_eq!(node.into_value(), 3);
    assert!(list.pop_node().is_some());
    assert!(list.pop_first_node().is_some());
    assert!(list.pop_node().is_none());
    assert!(list.pop_first_node().is_none());
}

/// Test delete_node on a node that was never linked and on one already popped
pub fn test_delete_foreign_node<L>()
where
    L: LruList<i32> + Default,
{
    let list: L = filled(&[1, 2, 3]);

    let stranger = Node::new(3);
    // SAFETY: stranger is alive and detached
    assert!(!unsafe { list.delete_node(stranger.handle()) });
    assert_eq!(list.to_vec(), vec![1, 2, 3]);

    let popped = list.pop_node().unwrap();
    // SAFETY: popped is alive and detached
    assert!(!unsafe { list.delete_node(popped.handle()) });
    // SAFETY: popped is alive and detached
    assert!(unsafe { list.unlink_node(popped.handle()) }.is_none());
    assert_eq!(list.to_vec(), vec![1, 2]);
}

/// Test delete_node on head, tail and middle nodes
pub fn test_delete_node_positions<L>()
where
    L: LruList<i32> + Default,
{
    let list: L = filled(&[1, 2, 3, 4, 5]);

    let head = list.get_node(0).unwrap();
    // SAFETY: head is linked into list
    assert!(unsafe { list.delete_node(head) });
    assert_eq!(list.first(), Some(2));

    let tail = list.get_node(list.len() - 1).unwrap();
    // SAFETY: tail is linked into list
    assert!(unsafe { list.delete_node(tail) });
    assert_eq!(list.last(), Some(4));

    let middle = list.get_node(1).unwrap();
    // SAFETY: middle is linked into list
    assert_eq!(unsafe { list.apply_on_node(middle, |v| *v) }, 3);
    // SAFETY: middle is linked into list
    assert!(unsafe { list.delete_node(middle) });
    assert_eq!(list.to_vec(), vec![2, 4]);

    let last_two: Vec<_> = (0..2).map(|i| list.get_node(i).unwrap()).collect();
    for handle in last_two {
        // SAFETY: handle is linked into list
        assert!(unsafe { list.delete_node(handle) });
    }
    assert!(list.is_empty());
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
}

/// Test that get_node(i) + delete_node equals delete(i)
pub fn test_get_node_delete_node_matches_delete<L>(index: usize)
where
    L: LruList<i32> + Default,
{
    let values = [1, 2, 3, 4, 5];
    let by_node: L = filled(&values);
    let by_index: L = filled(&values);

    let handle = by_node.get_node(index).unwrap();
    // SAFETY: handle is linked into by_node
    assert!(unsafe { by_node.delete_node(handle) });
    assert!(by_index.delete(index));
    assert_eq!(by_node.to_vec(), by_index.to_vec());
    assert!(by_node.get_node(values.len() - 1).is_none());
}

/// Test move-to-back relinking through unlink_node + append_node
pub fn test_move_to_back<L>()
where
    L: LruList<i32> + Default,
{
    let list: L = filled(&[1, 2, 3, 4]);
    let handle = list.get_node(1).unwrap();

    // SAFETY: handle is linked into list
    let node = unsafe { list.unlink_node(handle) }.unwrap();
    assert!(list.append_node(node));
    assert_eq!(list.to_vec(), vec![1, 3, 4, 2]);

    // SAFETY: handle is linked into list again
    unsafe { list.update_node(handle, |v| *v = 20) };
    assert_eq!(list.last(), Some(20));
    assert_eq!(list.get_node(3), Some(handle));
}

/// Test the stack façade: LIFO order and peek
pub fn test_stack_facade<L>()
where
    L: SafeList<i32> + Default,
{
    let stack: Stack<i32, L> = Stack::new();
    assert!(stack.is_empty());
    assert_eq!(stack.peek(), None);
    assert_eq!(stack.pop(), None);

    for i in 1..=3 {
        stack.push(i);
    }
    assert_eq!(stack.len(), 3);
    for i in (1..=3).rev() {
        assert_eq!(stack.peek(), Some(i));
        assert_eq!(stack.pop(), Some(i));
    }
    assert!(stack.is_empty());
}

/// Test the deque façade on both ends
pub fn test_deque_facade<L>()
where
    L: SafeList<i32> + Default,
{
    let deque: Deque<i32, L> = Deque::new();
    deque.append(1);
    deque.append(2);
    deque.append(3);
    deque.prepend(4);
    deque.prepend(5);
    assert_eq!(deque.len(), 5);
    assert_eq!(deque.front(), Some(5));
    assert_eq!(deque.back(), Some(3));

    assert_eq!(deque.pop(), Some(3));
    assert_eq!(deque.pop_first(), Some(5));
    assert_eq!(deque.len(), 3);
    assert_eq!(deque.pop_back(), Some(2));
    assert_eq!(deque.pop_front(), Some(4));
    assert_eq!(deque.pop(), Some(1));

    assert_eq!(deque.pop(), None);
    assert_eq!(deque.pop_first(), None);
    assert!(deque.is_empty());
}

/// Test that façades built on one list share its state
pub fn test_facades_share_list<L>()
where
    L: SafeList<i32> + Default,
{
    let list = Arc::new(L::default());
    let stack: Stack<i32, L> = Stack::from_shared(Arc::clone(&list));
    let deque: Deque<i32, L> = Deque::from_shared(Arc::clone(&list));
    assert!(Arc::ptr_eq(stack.shared(), &list));
    assert!(Arc::ptr_eq(deque.shared(), &list));

    stack.push(1);
    deque.push_front(0);
    deque.push_back(2);
    assert_eq!(list.to_vec(), vec![0, 1, 2]);
    assert_eq!(stack.pop(), Some(2));
    assert_eq!(deque.pop_front(), Some(0));
    assert_eq!(list.len(), 1);
}
